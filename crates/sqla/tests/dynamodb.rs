//! Live tests against DynamoDB or an emulator.
//!
//! Run with `cargo xtask integration`, or against an already running
//! endpoint with `cargo test -p sqla --features integration`.

#![cfg(feature = "integration")]

use sqla::conversions::load;
use sqla::core::compiler::{AttributeDefinition, KeySchemaElement, KeyType};
use sqla::core::error::CompileError;
use sqla::core::reflect::TableDescription;
use sqla::core::schema::{
    Column, ColumnType, MetaData, ScalarAttributeType, Table, KEY_ATTRIBUTE_TYPES,
};
use sqla::core::stmt::{col, delete, insert, select, update, RawStatement};
use sqla::core::value::{AttributeType, Record, Value};
use sqla::{ConnectOptions, Engine, Error};

const DEFAULT_ENDPOINT: &str = "http://localhost:4566";

async fn engine() -> Engine {
    let mut options = ConnectOptions::from_env();
    if options.endpoint_url.is_none() {
        options.endpoint_url = Some(DEFAULT_ENDPOINT.to_string());
    }
    Engine::with_options(&options).await
}

/// A table name no other test run will use.
fn unique_name() -> String {
    format!(
        "TEST_TABLE-{}-{}",
        chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S"),
        uuid::Uuid::new_v4().simple()
    )
}

fn table(name: &str, columns: impl IntoIterator<Item = Column>) -> Table {
    Table::new(name, columns).unwrap()
}

fn pk(name: &str, ty: ColumnType) -> Column {
    Column::new(name, ty).primary_key()
}

async fn create(engine: &Engine, table: &Table) {
    engine.create(table).await.unwrap();
    engine.wait_until_exists(table.name()).await.unwrap();
}

async fn cleanup(engine: &Engine, name: &str) {
    engine.drop(name).await.unwrap();
    engine.wait_until_not_exists(name).await.unwrap();
}

/// Every item of the table, read with a raw Scan and sorted by `id`.
async fn scan(engine: &Engine, name: &str) -> Vec<Record> {
    let response = engine
        .client()
        .scan()
        .table_name(name)
        .send()
        .await
        .unwrap();
    let mut records: Vec<Record> = response.items().iter().map(|i| load(i).unwrap()).collect();
    records.sort_by_key(|r| r.get("id").map(Value::to_string));
    records
}

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn key(name: &str, key_type: KeyType) -> KeySchemaElement {
    KeySchemaElement {
        attribute_name: name.to_string(),
        key_type,
    }
}

fn attr(name: &str, attribute_type: ScalarAttributeType) -> AttributeDefinition {
    AttributeDefinition {
        attribute_name: name.to_string(),
        attribute_type,
    }
}

async fn describe(engine: &Engine, name: &str) -> TableDescription {
    engine.inspector().describe_table(name).await.unwrap()
}

// ============================================================================
// INSERT
// ============================================================================

#[tokio::test]
async fn test_hash_insert_one_and_many() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(&name, [pk("id", ColumnType::String)]);
    create(&engine, &t).await;

    let conn = engine.connect();
    let cursor = conn.execute(insert(&t).value("id", "1")).await.unwrap();
    assert_eq!(cursor.rowcount(), 1);
    assert_eq!(
        scan(&engine, &name).await,
        vec![record(&[("id", "1".into())])]
    );

    for id in ["2", "3"] {
        conn.execute(insert(&t).value("id", id)).await.unwrap();
    }
    assert_eq!(
        scan(&engine, &name).await,
        vec![
            record(&[("id", "1".into())]),
            record(&[("id", "2".into())]),
            record(&[("id", "3".into())]),
        ]
    );

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_hash_with_attributes_insert_many() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(
        &name,
        [
            pk("id", ColumnType::String),
            Column::new("name", ColumnType::String),
        ],
    );
    create(&engine, &t).await;

    let conn = engine.connect();
    for (id, person) in [("1", "John"), ("2", "Jane"), ("3", "Jim")] {
        conn.execute(insert(&t).value("id", id).value("name", person))
            .await
            .unwrap();
    }

    assert_eq!(
        scan(&engine, &name).await,
        vec![
            record(&[("id", "1".into()), ("name", "John".into())]),
            record(&[("id", "2".into()), ("name", "Jane".into())]),
            record(&[("id", "3".into()), ("name", "Jim".into())]),
        ]
    );

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_hash_range_insert_many() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(
        &name,
        [pk("id", ColumnType::String), pk("ts", ColumnType::String)],
    );
    create(&engine, &t).await;

    let ts = chrono::Utc::now().to_rfc3339();
    let conn = engine.connect();
    for id in ["1", "2", "3"] {
        conn.execute(insert(&t).value("id", id).value("ts", ts.as_str()))
            .await
            .unwrap();
    }

    let expected: Vec<Record> = ["1", "2", "3"]
        .into_iter()
        .map(|id| record(&[("id", id.into()), ("ts", ts.as_str().into())]))
        .collect();
    assert_eq!(scan(&engine, &name).await, expected);

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_hash_range_with_attributes_insert_one() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(
        &name,
        [
            pk("id", ColumnType::String),
            pk("ts", ColumnType::String),
            Column::new("name", ColumnType::String),
            Column::new("age", ColumnType::Integer),
        ],
    );
    create(&engine, &t).await;

    let ts = chrono::Utc::now().to_rfc3339();
    let result = engine
        .execute(insert(&t).value("id", "1").value("nickname", "Jo"))
        .await;
    assert!(matches!(
        result,
        Err(Error::Compile(CompileError::UnknownColumn { .. }))
    ));

    engine
        .execute(
            insert(&t)
                .value("id", "1")
                .value("ts", ts.as_str())
                .value("name", "John")
                .value("age", 42),
        )
        .await
        .unwrap();

    assert_eq!(
        scan(&engine, &name).await,
        vec![record(&[
            ("age", 42.into()),
            ("id", "1".into()),
            ("name", "John".into()),
            ("ts", ts.as_str().into()),
        ])]
    );

    cleanup(&engine, &name).await;
}

// ============================================================================
// CREATE / DROP
// ============================================================================

#[tokio::test]
async fn test_create_table() {
    let engine = engine().await;
    let name = unique_name();
    create(&engine, &table(&name, [pk("id", ColumnType::String)])).await;

    let desc = describe(&engine, &name).await;
    assert_eq!(desc.key_schema, vec![key("id", KeyType::Hash)]);
    assert_eq!(
        desc.attribute_definitions,
        vec![attr("id", ScalarAttributeType::S)]
    );

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_drop_table() {
    let engine = engine().await;
    let name = unique_name();
    create(&engine, &table(&name, [pk("id", ColumnType::String)])).await;

    engine.drop(&name).await.unwrap();
    engine.wait_until_not_exists(&name).await.unwrap();

    let inspector = engine.inspector();
    assert!(!inspector.has_table(&name).await.unwrap());
    assert!(matches!(
        inspector.describe_table(&name).await,
        Err(Error::TableNotFound(_))
    ));
}

#[tokio::test]
async fn test_create_existing_table_fails() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(&name, [pk("id", ColumnType::String)]);
    create(&engine, &t).await;

    assert!(matches!(
        engine.create(&t).await,
        Err(Error::TableAlreadyExists(_))
    ));

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_create_all_hash_range_follows_declaration_order() {
    let engine = engine().await;
    let name = unique_name();
    let mut meta = MetaData::new();
    meta.add(table(
        &name,
        [pk("ts", ColumnType::String), pk("id", ColumnType::String)],
    ))
    .unwrap();

    assert_eq!(engine.create_all(&meta).await.unwrap(), vec![name.clone()]);

    let desc = describe(&engine, &name).await;
    assert_eq!(
        desc.key_schema,
        vec![key("ts", KeyType::Hash), key("id", KeyType::Range)]
    );
    assert_eq!(
        desc.attribute_definitions,
        vec![
            attr("ts", ScalarAttributeType::S),
            attr("id", ScalarAttributeType::S)
        ]
    );

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_create_all_only_defines_key_attributes() {
    let engine = engine().await;
    let name = unique_name();
    let mut columns = vec![pk("id", ColumnType::String), pk("ts", ColumnType::String)];
    columns.extend((1..=5).map(|i| Column::new(format!("name{i}"), ColumnType::String)));
    let mut meta = MetaData::new();
    meta.add(table(&name, columns)).unwrap();

    engine.create_all(&meta).await.unwrap();

    let desc = describe(&engine, &name).await;
    assert_eq!(
        desc.key_schema,
        vec![key("id", KeyType::Hash), key("ts", KeyType::Range)]
    );
    assert_eq!(desc.attribute_definitions.len(), 2);

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_create_all_and_drop_all_skip_what_is_done() {
    let engine = engine().await;
    let first = unique_name();
    let second = unique_name();
    let mut meta = MetaData::new();
    let first_table = table(&first, [pk("id", ColumnType::String)]);
    let second_table = table(&second, [pk("id", ColumnType::Integer)]);
    meta.add(first_table.clone()).unwrap();
    meta.add(second_table).unwrap();

    create(&engine, &first_table).await;

    assert_eq!(
        engine.create_all(&meta).await.unwrap(),
        vec![second.clone()]
    );
    assert!(engine.create_all(&meta).await.unwrap().is_empty());

    engine.drop(&first).await.unwrap();
    engine.wait_until_not_exists(&first).await.unwrap();

    assert_eq!(engine.drop_all(&meta).await.unwrap(), vec![second.clone()]);
    assert!(engine.drop_all(&meta).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_table_typed_keys() {
    let engine = engine().await;

    for (column_type, expected) in KEY_ATTRIBUTE_TYPES {
        let name = unique_name();
        create(
            &engine,
            &table(
                &name,
                [pk("id", ColumnType::String), pk("ts", *column_type)],
            ),
        )
        .await;

        let desc = describe(&engine, &name).await;
        assert_eq!(
            desc.attribute_definitions,
            vec![attr("id", ScalarAttributeType::S), attr("ts", *expected)],
            "range key of type {column_type}"
        );

        cleanup(&engine, &name).await;

        let name = unique_name();
        create(&engine, &table(&name, [pk("id", *column_type)])).await;

        let desc = describe(&engine, &name).await;
        assert_eq!(
            desc.attribute_definitions,
            vec![attr("id", *expected)],
            "hash key of type {column_type}"
        );

        cleanup(&engine, &name).await;
    }
}

#[tokio::test]
async fn test_integer_hash_key() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(
        &name,
        [
            pk("id", ColumnType::Integer),
            Column::new("name", ColumnType::String),
        ],
    );
    create(&engine, &t).await;

    let desc = describe(&engine, &name).await;
    assert_eq!(
        desc.attribute_definitions,
        vec![attr("id", ScalarAttributeType::N)]
    );

    engine
        .execute(insert(&t).value("id", 7).value("name", "Seven"))
        .await
        .unwrap();
    let mut cursor = engine
        .execute(select(&t).filter(col("id").eq(7)))
        .await
        .unwrap();
    let row = cursor.fetchone().unwrap();
    assert_eq!(row.get("id"), Some(&Value::Integer(7)));

    cleanup(&engine, &name).await;
}

// ============================================================================
// SELECT / UPDATE / DELETE
// ============================================================================

async fn seeded_table(engine: &Engine) -> Table {
    let name = unique_name();
    let t = table(
        &name,
        [
            pk("id", ColumnType::String),
            Column::new("name", ColumnType::String),
            Column::new("age", ColumnType::Integer),
        ],
    );
    create(engine, &t).await;

    let conn = engine.connect();
    for (id, person, age) in [("1", "John", 30), ("2", "Jane", 25), ("3", "Jim", 41)] {
        let stmt = insert(&t)
            .value("id", id)
            .value("name", person)
            .value("age", age);
        conn.execute(stmt).await.unwrap();
    }
    t
}

#[tokio::test]
async fn test_select_all() {
    let engine = engine().await;
    let t = seeded_table(&engine).await;

    let mut cursor = engine.execute(select(&t)).await.unwrap();
    assert_eq!(cursor.rowcount(), 3);

    let names: Vec<_> = cursor
        .description()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, vec!["id", "name", "age"]);
    assert_eq!(cursor.description()[2].type_code, AttributeType::N);

    let mut rows: Vec<_> = cursor.fetchall().iter().map(|r| r.as_map()).collect();
    rows.sort_by(|a, b| a["id"].to_string().cmp(&b["id"].to_string()));
    assert_eq!(
        rows,
        vec![
            record(&[("age", 30.into()), ("id", "1".into()), ("name", "John".into())]),
            record(&[("age", 25.into()), ("id", "2".into()), ("name", "Jane".into())]),
            record(&[("age", 41.into()), ("id", "3".into()), ("name", "Jim".into())]),
        ]
    );
    assert!(cursor.fetchone().is_none());
    assert!(cursor.fetchall().is_empty());

    cleanup(&engine, t.name()).await;
}

#[tokio::test]
async fn test_select_one() {
    let engine = engine().await;
    let t = seeded_table(&engine).await;

    let mut cursor = engine
        .execute(select(&t).columns(["id"]).filter(col("id").eq("1")))
        .await
        .unwrap();

    let rows = cursor.fetchall();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].as_map(), record(&[("id", "1".into())]));

    cleanup(&engine, t.name()).await;
}

#[tokio::test]
async fn test_select_with_limit_and_fetchmany() {
    let engine = engine().await;
    let t = seeded_table(&engine).await;

    let mut cursor = engine.execute(select(&t).limit(2)).await.unwrap();
    assert_eq!(cursor.rowcount(), 2);
    assert_eq!(cursor.fetchmany(1).len(), 1);
    assert_eq!(cursor.fetchmany(5).len(), 1);
    assert!(cursor.fetchmany(5).is_empty());

    cleanup(&engine, t.name()).await;
}

#[tokio::test]
async fn test_filtered_select_with_limit_reads_past_short_pages() {
    let engine = engine().await;
    let name = unique_name();
    let t = table(
        &name,
        [
            pk("id", ColumnType::String),
            pk("seq", ColumnType::Integer),
            Column::new("name", ColumnType::String),
        ],
    );
    create(&engine, &t).await;

    // A single partition is read in `seq` order, so the only match comes last.
    let conn = engine.connect();
    for (seq, person) in [(1, "John"), (2, "Jane"), (3, "Jim"), (4, "Ann")] {
        let stmt = insert(&t)
            .value("id", "p")
            .value("seq", seq)
            .value("name", person);
        conn.execute(stmt).await.unwrap();
    }

    let mut cursor = conn
        .execute(select(&t).filter(col("name").eq("Ann")).limit(1))
        .await
        .unwrap();
    assert_eq!(cursor.rowcount(), 1);

    let rows = cursor.fetchall();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("seq"), Some(&Value::Integer(4)));
    assert_eq!(rows[0].get("name"), Some(&Value::from("Ann")));

    cleanup(&engine, &name).await;
}

#[tokio::test]
async fn test_raw_statement() {
    let engine = engine().await;
    let t = seeded_table(&engine).await;

    let sql = format!(r#"SELECT "name" FROM "{}" WHERE "id" = ?"#, t.name());
    let mut cursor = engine
        .execute(RawStatement::new(sql).bind("2"))
        .await
        .unwrap();

    let row = cursor.fetchone().unwrap();
    assert_eq!(row.get("name"), Some(&Value::from("Jane")));

    cleanup(&engine, t.name()).await;
}

#[tokio::test]
async fn test_update_and_delete() {
    let engine = engine().await;
    let t = seeded_table(&engine).await;
    let conn = engine.connect();

    let cursor = conn
        .execute(update(&t).set("name", "Johnny").filter(col("id").eq("1")))
        .await
        .unwrap();
    assert_eq!(cursor.rowcount(), -1);

    conn.execute(update(&t).set("age", Value::Null).filter(col("id").eq("2")))
        .await
        .unwrap();
    conn.execute(delete(&t).filter(col("id").eq("3")))
        .await
        .unwrap();

    assert_eq!(
        scan(&engine, t.name()).await,
        vec![
            record(&[("age", 30.into()), ("id", "1".into()), ("name", "Johnny".into())]),
            record(&[("id", "2".into()), ("name", "Jane".into())]),
        ]
    );

    cleanup(&engine, t.name()).await;
}

// ============================================================================
// Reflection
// ============================================================================

#[tokio::test]
async fn test_reflection() {
    let engine = engine().await;
    let name = unique_name();
    create(
        &engine,
        &table(
            &name,
            [pk("id", ColumnType::String), pk("seq", ColumnType::Integer)],
        ),
    )
    .await;

    let inspector = engine.inspector();
    assert!(inspector.get_table_names().await.unwrap().contains(&name));

    let columns = inspector.get_columns(&name).await.unwrap();
    let summary: Vec<_> = columns
        .iter()
        .map(|c| (c.name.as_str(), c.ty.as_str(), c.nullable))
        .collect();
    assert_eq!(
        summary,
        vec![("id", "VARCHAR", false), ("seq", "FLOAT", false)]
    );

    let pk = inspector.get_pk_constraint(&name).await.unwrap();
    assert_eq!(pk.name, "pk");
    assert_eq!(pk.constrained_columns, vec!["id", "seq"]);
    assert!(inspector.get_foreign_keys(&name).await.unwrap().is_empty());
    assert!(inspector.get_indexes(&name).await.unwrap().is_empty());

    let reflected = inspector.reflect_table(&name).await.unwrap();
    engine
        .execute(insert(&reflected).value("id", "a").value("seq", 1))
        .await
        .unwrap();
    let mut cursor = engine.execute(select(&reflected)).await.unwrap();
    assert_eq!(cursor.fetchall().len(), 1);

    cleanup(&engine, &name).await;
}
