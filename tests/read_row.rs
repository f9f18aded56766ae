use widecol::{Cell, ReadError, RowFilter, RowKey, RowSet, Step};

mod common;
use common::{client, table_path};

#[test]
fn latest_email_of_one_user() -> widecol::Result<()> {
    let client = client();
    let read = client
        .read("users")?
        .row("user#1")
        .family("profile")
        .column("email")
        .latest_cell();

    let request = read.request();
    assert_eq!(request.table_name, table_path("users"));
    assert_eq!(request.rows, RowSet::Keys(vec![RowKey::from("user#1")]));
    assert_eq!(request.rows_limit, 1);
    assert_eq!(
        read.filters().as_slice(),
        [
            RowFilter::FamilyNameRegex("profile".into()),
            RowFilter::ColumnQualifierRegex("email".into()),
            RowFilter::CellsPerColumnLimit(1),
        ]
    );
    assert!(matches!(&request.filter, Some(RowFilter::Chain(filters)) if filters.len() == 3));
    assert_eq!(read.projection(), [Step::First; 4]);

    let cell: Option<Cell> = read.execute()?;
    assert_eq!(cell, Some(Cell::new(20, "ada@example.com")));
    Ok(())
}

#[test]
fn whole_row() -> widecol::Result<()> {
    let client = client();
    let row = client.read("users")?.row("user#1").execute()?;
    let row = row.expect("user#1 is seeded");
    assert_eq!(row.key, RowKey::from("user#1"));
    assert_eq!(row.cell_count(), 4);
    assert_eq!(
        row.families.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        ["profile", "stats"]
    );
    Ok(())
}

#[test]
fn binary_and_string_keys_select_the_same_row() -> widecol::Result<()> {
    let client = client();
    let table = client.read("users")?;
    let by_str = table.row("user#2").execute()?;
    let by_bytes = table.row(&b"user#2"[..]).execute()?;
    assert!(by_str.is_some());
    assert_eq!(by_str, by_bytes);
    Ok(())
}

#[test]
fn missing_data_is_absent_not_an_error() -> widecol::Result<()> {
    let client = client();
    let table = client.read("users")?;

    assert_eq!(table.row("nobody").execute()?, None);
    assert_eq!(table.row("nobody").family("profile").execute()?, None);
    assert_eq!(
        table
            .row("user#3")
            .family("profile")
            .column("email")
            .latest_cell()
            .execute()?,
        None
    );
    assert!(
        table
            .row("user#1")
            .family("profile")
            .column("phone")
            .cells()
            .execute()?
            .is_empty()
    );
    assert!(table.row("nobody").families().execute()?.is_empty());
    Ok(())
}

#[test]
fn all_versions_of_one_column() -> widecol::Result<()> {
    let client = client();
    let cells = client
        .read("users")?
        .row("user#1")
        .family("profile")
        .column("email")
        .cells()
        .execute()?;
    assert_eq!(
        cells,
        [
            Cell::new(20, "ada@example.com"),
            Cell::new(10, "old@example.com")
        ]
    );
    Ok(())
}

#[test]
fn families_of_one_row() -> widecol::Result<()> {
    let client = client();
    let table = client.read("users")?;
    let names = |families: Vec<widecol::Family>| {
        families
            .into_iter()
            .map(|f| f.name.to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        names(table.row("user#1").families().execute()?),
        ["profile", "stats"]
    );
    assert_eq!(
        names(table.row("user#1").family_regex("pro.*").execute()?),
        ["profile"]
    );
    assert_eq!(
        names(table.row("user#1").families_named(["stats", "nope"]).execute()?),
        ["stats"]
    );
    assert!(
        table
            .row("user#1")
            .families_named(Vec::<String>::new())
            .execute()?
            .is_empty()
    );
    Ok(())
}

#[test]
fn columns_of_one_family() -> widecol::Result<()> {
    let client = client();
    let columns = client
        .read("users")?
        .row("user#1")
        .family("profile")
        .columns()
        .execute()?;
    assert_eq!(
        columns.iter().map(|c| &c.qualifier[..]).collect::<Vec<_>>(),
        [&b"email"[..], &b"name"[..]]
    );
    assert_eq!(columns[0].cells.len(), 2);
    Ok(())
}

#[test]
fn empty_qualifier_list_selects_nothing() -> widecol::Result<()> {
    let client = client();
    let read = client
        .read("users")?
        .row("a")
        .family("f")
        .columns_named(Vec::<&str>::new());
    assert_eq!(read.filters().as_slice().last(), Some(&RowFilter::BlockAll));
    assert!(read.execute()?.is_empty());
    Ok(())
}

#[test]
fn table_ids_are_validated() {
    let client = client();
    let too_long = "t".repeat(51);
    for bad in ["", "-users", ".users", "a/b", "users table", too_long.as_str()] {
        assert!(
            matches!(client.read(bad), Err(ReadError::InvalidTableName(ref t)) if t == bad),
            "{bad:?} should be rejected"
        );
    }
    assert!(client.read("users_v2.archive-1").is_ok());
}
