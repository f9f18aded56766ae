use widecol::escape::escape_literal;
use widecol::filter::{exact_match, exact_match_any};
use widecol::{Cell, Field, MemoryAdapter, RangeSpec, RowFilter};

mod common;
use common::{client, client_with};

/// Literals full of regex syntax next to strings their unescaped pattern
/// would also match.
fn tricky_store() -> MemoryAdapter {
    MemoryAdapter::new()
        .with_cell("r", "cf", "a.c", 1, "dot")
        .with_cell("r", "cf", "abc", 1, "plain")
        .with_cell("r", "cf", "a+", 1, "plus")
        .with_cell("r", "cf", "aa", 1, "double")
        .with_cell("r", "cf", "(x|y)", 1, "group")
        .with_cell("r", "cf", "x", 1, "x")
        .with_cell("r", "cf", &b"\xff\x00"[..], 1, "binary")
        .with_cell("r", "c.f", "q", 1, "dotted family")
        .with_cell("r", "cxf", "q", 1, "lookalike family")
}

fn qualifiers(columns: &[widecol::Column]) -> Vec<&[u8]> {
    columns.iter().map(|c| &c.qualifier[..]).collect()
}

#[test]
fn exact_qualifiers_match_only_themselves() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let column = |q: &[u8]| -> widecol::Result<Option<widecol::Column>> {
        client.read("t")?.row("r").family("cf").column(q).execute()
    };

    for literal in [&b"a.c"[..], &b"a+"[..], &b"(x|y)"[..], &b"\xff\x00"[..]] {
        let found = column(literal)?.expect("literal is seeded");
        assert_eq!(&found.qualifier[..], literal);
    }
    assert!(column(&b"a*"[..])?.is_none());
    Ok(())
}

#[test]
fn exact_family_names_match_only_themselves() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let family = client.read("t")?.row("r").family("c.f").execute()?;
    let family = family.expect("c.f is seeded");
    assert_eq!(family.name, "c.f");
    assert_eq!(family.columns.len(), 1);
    Ok(())
}

#[test]
fn named_qualifiers_select_exactly_that_set() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let columns = client
        .read("t")?
        .row("r")
        .family("cf")
        .columns_named(["a.c", "(x|y)", "missing"])
        .execute()?;
    assert_eq!(qualifiers(&columns), [&b"(x|y)"[..], &b"a.c"[..]]);
    Ok(())
}

#[test]
fn qualifier_regex_is_used_verbatim() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let columns = client
        .read("t")?
        .row("r")
        .family("cf")
        .column_regex("a.c")
        .execute()?;
    assert_eq!(qualifiers(&columns), [&b"a.c"[..], &b"abc"[..]]);
    Ok(())
}

#[test]
fn qualifier_ranges() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let table = client.read("t")?;

    let columns = table
        .row("r")
        .family("cf")
        .columns()
        .start_qualifier_closed("a")
        .end_qualifier_open("ab")
        .execute()?;
    assert_eq!(qualifiers(&columns), [&b"a+"[..], &b"a.c"[..], &b"aa"[..]]);

    let columns = table
        .row("r")
        .family("cf")
        .columns()
        .qualifier_range(RangeSpec::new().start_open("abc").end_closed("x"))?
        .execute()?;
    assert_eq!(qualifiers(&columns), [&b"x"[..]]);
    Ok(())
}

#[test]
fn ranges_after_one_family_stay_in_that_family() -> widecol::Result<()> {
    let client = client_with(tricky_store());
    let rows = client
        .read("t")?
        .rows()
        .family("cxf")
        .columns()
        .start_qualifier_closed("q")
        .execute()?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].families.len(), 1);
    assert_eq!(rows[0].families[0].name, "cxf");
    Ok(())
}

#[test]
fn cell_filters() -> widecol::Result<()> {
    let client = client();
    let table = client.read("users")?;
    let email = || table.row("user#1").family("profile").column("email").cells();

    assert_eq!(
        email().limit(1).execute()?,
        [Cell::new(20, "ada@example.com")]
    );
    assert_eq!(
        email().limit(0).execute()?,
        [
            Cell::new(20, "ada@example.com"),
            Cell::new(10, "old@example.com")
        ]
    );
    assert_eq!(
        email().end_timestamp_micros(20).execute()?,
        [Cell::new(10, "old@example.com")]
    );
    assert_eq!(
        email().start_timestamp_micros(20).execute()?,
        [Cell::new(20, "ada@example.com")]
    );
    assert_eq!(
        email().timestamp_range(Some(5), Some(15))?.execute()?,
        [Cell::new(10, "old@example.com")]
    );
    assert_eq!(
        email().value_regex("old@.*").execute()?,
        [Cell::new(10, "old@example.com")]
    );
    assert_eq!(
        email()
            .value_range(RangeSpec::new().start_closed("b"))?
            .execute()?,
        [Cell::new(10, "old@example.com")]
    );
    Ok(())
}

#[test]
fn filter_order_is_call_order() -> widecol::Result<()> {
    let client = client();
    let cells = client
        .read("users")?
        .row("user#1")
        .family("profile")
        .column("email")
        .cells()
        .limit(1)
        .start_timestamp_micros(0)
        .end_timestamp_micros(15)
        .execute()?;
    assert!(cells.is_empty(), "limit runs before the timestamp range");

    let cells = client
        .read("users")?
        .row("user#1")
        .family("profile")
        .column("email")
        .cells()
        .end_timestamp_micros(15)
        .limit(1)
        .execute()?;
    assert_eq!(cells, [Cell::new(10, "old@example.com")]);
    Ok(())
}

#[test]
fn builders_produce_the_documented_predicates() {
    assert_eq!(
        exact_match(Field::Qualifier, "a.c"),
        RowFilter::ColumnQualifierRegex(r"a\.c".into())
    );
    assert_eq!(
        exact_match_any(Field::Family, ["x", "y+"]),
        RowFilter::FamilyNameRegex(r"x|y\+".into())
    );
    assert_eq!(
        exact_match_any(Field::Value, Vec::<&[u8]>::new()),
        RowFilter::BlockAll
    );
    assert_eq!(escape_literal(b"\n"), r"\x0A");
}
