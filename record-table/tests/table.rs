use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use record_table::{CellValue, ColumnDef, EventResult, Record, RecordTable, SortDirection, SortSpec};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: u32,
    n: &'static str,
    v: Option<f64>,
    w: f64,
}

impl Record for Item {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn values(&self) -> Vec<CellValue> {
        vec![self.n.into(), self.v.into(), self.w.into()]
    }
}

fn item(id: u32, n: &'static str, v: f64, w: f64) -> Item {
    Item {
        id,
        n,
        v: Some(v),
        w,
    }
}

fn columns() -> Vec<ColumnDef<Item>> {
    vec![
        ColumnDef::new("n", "Name", |i: &Item| i.n.into()),
        ColumnDef::new("v", "Value", |i: &Item| i.v.into()).class("numeric"),
        ColumnDef::new("w", "Weight", |i: &Item| i.w.into()),
    ]
}

fn table(items: Vec<Item>) -> RecordTable<Item> {
    RecordTable::new("Items", columns(), Arc::new(items))
}

fn names(table: &RecordTable<Item>) -> Vec<&'static str> {
    table
        .visible_rows()
        .into_iter()
        .map(|i| table.records()[i].n)
        .collect()
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn test_empty_filter_returns_all_in_order() {
    let t = table(vec![
        item(1, "c", 3.0, 0.0),
        item(2, "a", 1.0, 0.0),
        item(3, "b", 2.0, 0.0),
    ]);
    assert_eq!(names(&t), vec!["c", "a", "b"]);
    assert_eq!(t.filtered_count(), 3);
}

#[test]
fn test_filter_is_case_insensitive_substring_over_any_attribute() {
    let mut t = table(vec![
        item(1, "Billing", 10.0, 0.5),
        item(2, "Onboarding", 42.0, 0.25),
        item(3, "Exports", 7.0, 0.75),
    ]);

    t.set_filter_text("ING");
    assert_eq!(names(&t), vec!["Billing", "Onboarding"]);

    // Numeric attributes match through their text form.
    t.set_filter_text("42");
    assert_eq!(names(&t), vec!["Onboarding"]);

    t.set_filter_text("0.75");
    assert_eq!(names(&t), vec!["Exports"]);

    t.set_filter_text("nothing");
    assert!(names(&t).is_empty());
    assert_eq!(t.filtered_count(), 0);
}

#[test]
fn test_filter_matches_attributes_without_columns() {
    // "w" is hidden, but hidden columns still take part in filtering.
    let mut t = table(vec![item(1, "a", 1.0, 123.0), item(2, "b", 2.0, 5.0)]);
    t.toggle_column("w");
    t.set_filter_text("123");
    assert_eq!(names(&t), vec!["a"]);
}

#[test]
fn test_clear_filter() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0), item(2, "b", 2.0, 0.0)]);
    t.set_filter_text("a");
    assert_eq!(t.filtered_count(), 1);
    t.clear_filter();
    assert_eq!(t.filter_text(), "");
    assert_eq!(names(&t), vec!["a", "b"]);
}

// ============================================================================
// Sort
// ============================================================================

#[test]
fn test_sort_toggle_cycle() {
    let mut t = table(vec![
        item(1, "x", 3.0, 1.0),
        item(2, "y", 1.0, 3.0),
        item(3, "z", 2.0, 2.0),
    ]);
    let values = |t: &RecordTable<Item>| -> Vec<f64> {
        t.visible_rows()
            .into_iter()
            .map(|i| t.records()[i].v.unwrap_or_default())
            .collect()
    };

    assert_eq!(t.on_header_click("v"), EventResult::Consumed);
    assert_eq!(values(&t), vec![1.0, 2.0, 3.0]);

    t.on_header_click("v");
    assert_eq!(values(&t), vec![3.0, 2.0, 1.0]);
    assert_eq!(t.sort(), Some(SortSpec::descending("v")));

    t.on_header_click("w");
    assert_eq!(t.sort(), Some(SortSpec::ascending("w")));
    assert_eq!(names(&t), vec!["x", "z", "y"]);
}

#[test]
fn test_sort_never_returns_to_insertion_order() {
    let mut t = table(vec![item(1, "b", 2.0, 0.0), item(2, "a", 1.0, 0.0)]);
    for _ in 0..5 {
        t.on_header_click("n");
        assert!(t.sort().is_some());
        assert_ne!(names(&t), Vec::<&str>::new());
    }
    // Five clicks: asc, desc, asc, desc, asc.
    assert_eq!(t.sort().map(|s| s.direction), Some(SortDirection::Ascending));
    assert_eq!(names(&t), vec!["a", "b"]);
}

#[test]
fn test_header_click_on_unknown_column_is_ignored() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]);
    assert_eq!(t.on_header_click("missing"), EventResult::Ignored);
    assert_eq!(t.sort(), None);
}

#[test]
fn test_filter_then_sort() {
    let mut t = table(vec![
        item(1, "b", 2.0, 0.0),
        item(2, "a", 1.0, 0.0),
        item(3, "ab", 3.0, 0.0),
    ]);
    t.set_filter_text("a");
    t.toggle_sort("v");
    assert_eq!(names(&t), vec!["a", "ab"]);
    assert_eq!(t.filtered_count(), 2);
}

#[test]
fn test_clear_sort_restores_insertion_order() {
    let mut t = table(vec![item(1, "b", 2.0, 0.0), item(2, "a", 1.0, 0.0)]);
    t.set_sort(SortSpec::ascending("n"));
    assert_eq!(names(&t), vec!["a", "b"]);
    t.clear_sort();
    assert_eq!(names(&t), vec!["b", "a"]);
}

#[test]
fn test_sort_does_not_mutate_records() {
    let records = Arc::new(vec![item(1, "b", 2.0, 0.0), item(2, "a", 1.0, 0.0)]);
    let mut t = RecordTable::new("Items", columns(), Arc::clone(&records));
    t.toggle_sort("n");
    t.set_filter_text("a");
    let _ = t.visible_rows();
    assert_eq!(records[0].n, "b");
    assert_eq!(records[1].n, "a");
    assert_eq!(t.records(), records.as_slice());
}

// ============================================================================
// Column visibility
// ============================================================================

#[test]
fn test_visible_columns_stay_a_subset() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]);
    let known = ["n", "v", "w"];
    let toggles = ["v", "bogus", "n", "v", "w", "x", "n", "w", "n"];

    for key in toggles {
        t.on_toggle_column(key);
        for column in t.visible_columns() {
            assert!(known.contains(&column.key));
        }
        for entry in t.column_menu() {
            assert!(known.contains(&entry.key));
        }
    }
    assert_eq!(t.on_toggle_column("bogus"), EventResult::Ignored);
}

#[test]
fn test_all_columns_can_be_hidden() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]);
    t.toggle_column("n");
    t.toggle_column("v");
    t.toggle_column("w");
    assert!(t.visible_columns().is_empty());

    let rendered = t.render();
    assert!(rendered.header.is_empty());
    assert_eq!(rendered.rows.len(), 1);
    assert!(rendered.rows[0].cells.is_empty());

    t.show_all_columns();
    assert_eq!(t.visible_columns().len(), 3);
}

#[test]
fn test_set_column_visible_does_not_toggle() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]);
    assert_eq!(t.set_column_visible("w", false), Some(true));
    assert_eq!(t.set_column_visible("w", false), Some(false));
    assert!(!t.is_column_visible("w"));
    assert_eq!(t.set_column_visible("missing", false), None);
    assert_eq!(t.set_column_visible("w", true), Some(true));
    assert!(t.is_column_visible("w"));
}

#[test]
fn test_hidden_sort_column_still_sorts() {
    let mut t = table(vec![item(1, "a", 2.0, 0.0), item(2, "b", 1.0, 0.0)]);
    t.toggle_sort("v");
    t.toggle_column("v");
    assert_eq!(names(&t), vec!["b", "a"]);
}

// ============================================================================
// Row activation
// ============================================================================

#[test]
fn test_row_activation_passes_original_record() {
    let records = Arc::new(vec![
        item(1, "b", 2.0, 0.0),
        item(2, "a", 1.0, 0.0),
        item(3, "c", 3.0, 0.0),
    ]);
    let hit = Rc::new(Cell::new(0usize));
    let captured = Rc::clone(&hit);

    let mut t = RecordTable::new("Items", columns(), Arc::clone(&records))
        .on_row_activate(move |record: &Item| captured.set(record as *const Item as usize));

    t.set_filter_text("a");
    t.toggle_sort("v");
    // Only "a" remains after filtering; it is record 1 of the input.
    assert_eq!(t.on_row_click(0), EventResult::Consumed);
    assert_eq!(hit.get(), &records[1] as *const Item as usize);

    t.clear_filter();
    t.on_row_click(2);
    assert_eq!(hit.get(), &records[2] as *const Item as usize);
}

#[test]
fn test_row_click_outside_rows_is_ignored() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]).on_row_activate(move |_| {
        counter.set(counter.get() + 1);
    });
    assert_eq!(t.on_row_click(5), EventResult::Ignored);
    assert_eq!(calls.get(), 0);
    assert_eq!(t.on_row_click(0), EventResult::Consumed);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_row_at_follows_display_order() {
    let mut t = table(vec![item(1, "b", 2.0, 0.0), item(2, "a", 1.0, 0.0)]);
    t.toggle_sort("n");
    assert_eq!(t.row_at(0).map(|r| r.id), Some(2));
    assert_eq!(t.row_at(1).map(|r| r.id), Some(1));
    assert!(t.row_at(2).is_none());
}

// ============================================================================
// Missing values
// ============================================================================

#[test]
fn test_missing_value_renders_empty() {
    let mut missing = item(1, "a", 0.0, 0.0);
    missing.v = None;
    let t = table(vec![missing]);
    let rendered = t.render();
    assert_eq!(rendered.rows[0].cells[1].text, "");
    for line in rendered.to_lines(80) {
        assert!(!line.contains("undefined"));
        assert!(!line.contains("null"));
        assert!(!line.contains("None"));
    }
}

// ============================================================================
// Paging
// ============================================================================

#[test]
fn test_paging_reports_pre_page_count() {
    let items = (0..25)
        .map(|i| item(i, "row", f64::from(i), 0.0))
        .collect();
    let mut t = table(items).with_page_size(10);
    assert_eq!(t.page_count(), 3);
    assert_eq!(t.visible_rows().len(), 10);
    assert_eq!(t.filtered_count(), 25);

    assert!(t.next_page());
    assert!(t.next_page());
    assert!(!t.next_page());
    assert_eq!(t.page(), 2);
    assert_eq!(t.visible_rows(), (20..25).collect::<Vec<_>>());

    assert!(t.prev_page());
    assert_eq!(t.page(), 1);
}

#[test]
fn test_filter_change_resets_page() {
    let items = (0..25)
        .map(|i| item(i, if i % 2 == 0 { "even" } else { "odd" }, f64::from(i), 0.0))
        .collect();
    let mut t = table(items).with_page_size(5);
    t.set_page(4);
    assert_eq!(t.page(), 4);
    t.set_filter_text("even");
    assert_eq!(t.page(), 0);
    assert_eq!(t.filtered_count(), 13);
    assert_eq!(t.page_count(), 3);
}

#[test]
fn test_page_clamps_when_records_shrink() {
    let items: Vec<Item> = (0..30).map(|i| item(i, "r", f64::from(i), 0.0)).collect();
    let mut t = table(items).with_page_size(10);
    t.set_page(2);
    t.set_records(Arc::new(vec![item(1, "only", 1.0, 0.0)]));
    assert_eq!(t.page(), 0);
    assert_eq!(names(&t), vec!["only"]);
}

#[test]
fn test_set_page_replaces_stale_page_after_shrink() {
    let items: Vec<Item> = (0..30).map(|i| item(i, "r", f64::from(i), 0.0)).collect();
    let mut t = table(items.clone()).with_page_size(10);
    t.set_page(2);
    t.set_records(Arc::new(vec![item(1, "only", 1.0, 0.0)]));
    t.set_page(0);
    t.set_records(Arc::new(items));
    assert_eq!(t.page(), 0);
    assert_eq!(names(&t).len(), 10);
    assert_eq!(t.row_at(0).map(|i| i.id), Some(0));
}

// ============================================================================
// Instances and dirty tracking
// ============================================================================

#[test]
fn test_tables_do_not_share_state() {
    let records = Arc::new(vec![item(1, "a", 1.0, 0.0), item(2, "b", 2.0, 0.0)]);
    let mut first = RecordTable::new("First", columns(), Arc::clone(&records));
    let second = RecordTable::new("Second", columns(), Arc::clone(&records));
    first.set_filter_text("a");
    first.toggle_sort("v");
    first.toggle_column("w");
    assert_eq!(second.filter_text(), "");
    assert_eq!(second.sort(), None);
    assert!(second.is_column_visible("w"));
}

#[test]
fn test_take_dirty() {
    let mut t = table(vec![item(1, "a", 1.0, 0.0)]);
    assert!(t.take_dirty());
    assert!(!t.take_dirty());
    t.set_filter_text("");
    assert!(!t.take_dirty());
    t.on_filter_input('a');
    assert!(t.take_dirty());
    t.on_filter_backspace();
    assert!(t.take_dirty());
    assert_eq!(t.on_filter_backspace(), EventResult::Ignored);
}
