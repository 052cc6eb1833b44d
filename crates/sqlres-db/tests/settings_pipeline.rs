//! End-to-end run of a settings-defined resource, from TOML to rows

use rstest::*;
use serde_json::json;
use sqlres_core::{BoundParams, ChangeValue, Order, Term, Value};
use sqlres_db::{Clauses, QueryExecutor, Settings};

const SETTINGS: &str = r#"
[database]
url = "sqlite::memory:"

[resources.users]
tables = ["users"]

[resources.users.field_columns]
id = "id"
name = "user_name"
age = "user_age"
"#;

const SCHEMA: &[&str] = &[
	"CREATE TABLE users (id INTEGER PRIMARY KEY, user_name TEXT, user_age INTEGER)",
	"INSERT INTO users (id, user_name, user_age) VALUES (5, 'foo', 24), (11, 'bar', 30), (12, 'lorem', 19)",
];

#[rstest]
#[tokio::test]
async fn test_crud_through_settings() {
	// Arrange
	let settings = Settings::from_toml_str(SETTINGS).unwrap();
	let executor = settings.database.connect().await.unwrap();
	for statement in SCHEMA {
		executor
			.execute(statement, &BoundParams::new())
			.await
			.unwrap();
	}
	let users = settings.resource("users").unwrap();
	let binder = settings.database.binder();
	let select = users.select_model(executor.clone(), binder).unwrap();
	let insert = users.insert_model(executor.clone(), binder).unwrap();
	let update = users.update_model(executor.clone(), binder).unwrap();
	let delete = users.delete_model(executor.clone(), binder).unwrap();
	let adults = Clauses::new()
		.filter(Term::field("users", "age").gte(Term::literal(20)))
		.order_by(Order::asc("id"));

	// Act
	insert
		.insert(vec![json!({"id": 20, "name": "Alice", "age": 33})])
		.await
		.unwrap();
	update
		.update(
			[("age", ChangeValue::from(Term::literal("age").plus(Term::literal(1))))],
			&Clauses::new().filter(Term::field("users", "id").equals(Term::literal(12))),
		)
		.await
		.unwrap();
	delete
		.delete(&Clauses::new().filter(Term::field("users", "name").equals(Term::literal("bar"))))
		.await
		.unwrap();
	let rows = select.select_fields(&adults).await.unwrap();

	// Assert
	let ids: Vec<&Value> = rows.iter().map(|row| &row["id"]).collect();
	assert_eq!(ids, vec![&Value::Int(5), &Value::Int(12), &Value::Int(20)]);
	assert_eq!(rows[1]["age"], Value::Int(20));
	assert_eq!(rows[2]["name"], Value::from("Alice"));
}
