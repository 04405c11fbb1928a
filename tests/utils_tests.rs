use staffroll::models::employee::Employee;
use staffroll::models::shift::Shift;
use staffroll::utils::date::{all_days_of_month, month_name};
use staffroll::utils::formatting::strip_markup;
use staffroll::utils::table::Table;

#[test]
fn strip_markup_splits_blocks_and_decodes_entities() {
    let lines = strip_markup("<h1>ACME&nbsp;Ltd</h1><p>Via Roma 1<br/>Milano</p><p>   </p>");
    assert_eq!(lines, vec!["ACME Ltd", "Via Roma 1", "Milano"]);
}

#[test]
fn strip_markup_of_plain_text_is_unchanged() {
    assert_eq!(strip_markup("Just text"), vec!["Just text"]);
    assert!(strip_markup("").is_empty());
}

#[test]
fn shift_codes_are_lenient() {
    assert_eq!(Shift::from_code("Full-Day"), Some(Shift::FullDay));
    assert_eq!(Shift::from_code(" night "), Some(Shift::Night));
    assert_eq!(Shift::from_code("evening"), None);
    for s in Shift::ALL {
        assert_eq!(Shift::from_db_str(s.to_db_str()), Some(s));
    }
}

#[test]
fn employee_search_is_case_insensitive() {
    let emp = Employee::new("Mario Rossi", "M001", "Nurse", Shift::Morning);
    assert!(emp.matches("ROSSI"));
    assert!(emp.matches("m00"));
    assert!(emp.matches("nur"));
    assert!(!emp.matches("doctor"));
}

#[test]
fn month_helpers_cover_edges() {
    assert_eq!(month_name(1), Some("January"));
    assert_eq!(month_name(12), Some("December"));
    assert_eq!(month_name(0), None);
    assert_eq!(all_days_of_month(2025, 12).map(|d| d.len()), Some(31));
    assert!(all_days_of_month(2025, 13).is_none());
}

#[test]
fn table_columns_fit_the_widest_cell() {
    let mut table = Table::with_headers(&["ID", "NAME"]);
    table.add_row(vec!["1".into(), "Zoë Müller".into()]);
    let out = table.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID NAME       ");
    assert_eq!(lines[1], "-- ---------- ");
    assert_eq!(lines[2], "1  Zoë Müller ");
}
