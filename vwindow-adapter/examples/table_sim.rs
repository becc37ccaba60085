use vwindow_adapter::table::{HeaderCell, SortState, TableOptions};
use vwindow_adapter::{
    Axis, Column, FieldValue, Modifiers, Row, ScrollBehavior, Surface, TableSurface,
    VirtualTable,
};

struct Host {
    rows: Vec<String>,
    selected: Vec<bool>,
}

impl Surface for Host {
    type Node = String;

    fn viewport_size(&self, _axis: Axis) -> u32 {
        200
    }

    fn set_extent(&mut self, _axis: Axis, _extent: u64) {}

    fn scroll_to(&mut self, _axis: Axis, _offset: u64, _behavior: ScrollBehavior) {}

    fn replace_content(&mut self, _axis: Axis, _translate: u64, nodes: Vec<String>) {
        self.selected = vec![false; nodes.len()];
        self.rows = nodes;
    }

    fn set_translate(&mut self, _axis: Axis, _translate: u64) {}

    fn replace_node(&mut self, slot: usize, node: String) {
        if let Some(row) = self.rows.get_mut(slot) {
            *row = node;
        }
    }

    fn node(&self, slot: usize) -> Option<&String> {
        self.rows.get(slot)
    }

    fn measure(&self, _axis: Axis, _slot: usize) -> f64 {
        40.0
    }

    fn teardown(&mut self) {
        self.rows.clear();
    }
}

impl TableSurface for Host {
    fn render_header(&mut self, headers: &[HeaderCell]) {
        let labels: Vec<&str> = headers.iter().map(|h| h.label.as_str()).collect();
        println!("header: {}", labels.join(" | "));
    }

    fn set_sort_indicator(&mut self, sort: Option<&SortState>) {
        println!("sort indicator: {sort:?}");
    }

    fn set_row_selected(&mut self, slot: usize, selected: bool) {
        if let Some(s) = self.selected.get_mut(slot) {
            *s = selected;
        }
    }
}

struct Service {
    name: &'static str,
    p99_ms: f64,
}

impl Row for Service {
    fn field(&self, field: &str) -> FieldValue<'_> {
        match field {
            "name" => self.name.into(),
            "p99" => self.p99_ms.into(),
            _ => FieldValue::Empty,
        }
    }
}

fn print_rows(t: &VirtualTable<Service, Host>) {
    let host = t.engine().surface();
    for (row, selected) in host.rows.iter().zip(&host.selected) {
        println!("  {} {row}", if *selected { "*" } else { " " });
    }
}

fn main() -> Result<(), vwindow_adapter::Error> {
    let options = TableOptions::new(
        vec![
            Column::new("name", "Service").with_sortable(true),
            Column::new("p99", "p99")
                .with_width(80)
                .with_sortable(true)
                .with_render(|s: &Service, _| format!("{:.1} ms", s.p99_ms)),
        ],
        |_s: &Service, _i, cells: &[String]| Ok(cells.join(" | ")),
    )
    .with_on_selection_change(Some(|indices: &[usize]| println!("selection: {indices:?}")));
    let host = Host {
        rows: Vec::new(),
        selected: Vec::new(),
    };
    let mut t = VirtualTable::new(host, options)?;

    t.set_items(vec![
        Service { name: "search", p99_ms: 41.0 },
        Service { name: "auth", p99_ms: 12.5 },
        Service { name: "billing", p99_ms: 88.2 },
        Service { name: "gateway", p99_ms: 7.9 },
    ]);
    let mut now_ms = t.run_until_idle(0)?;
    print_rows(&t);

    t.click_row(0, Modifiers::NONE);
    t.click_row(2, Modifiers::RANGE);
    t.sort("p99");
    now_ms = t.run_until_idle(now_ms + 16)?;
    println!("sorted by p99, selection follows its rows:");
    print_rows(&t);

    t.sort("p99");
    t.run_until_idle(now_ms + 16)?;
    println!("descending:");
    print_rows(&t);
    let names: Vec<&str> = t.selected_items().iter().map(|s| s.name).collect();
    println!("selected: {names:?}");
    Ok(())
}
