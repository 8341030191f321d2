//! The console's built-in demo data. Ids are fixed short strings so the
//! seeded rows are stable across sessions; everything created at runtime
//! gets a UUID instead.

use crate::error::Result;
use crate::model::{FieldValue, Fields, Record};
use crate::store::EntityStore;

fn user(id: &str, name: &str, email: &str, role: &str, status: &str) -> Record {
    let mut fields = Fields::new();
    fields.insert("name".into(), FieldValue::text(name));
    fields.insert("email".into(), FieldValue::text(email));
    fields.insert("role".into(), FieldValue::text(role));
    fields.insert("status".into(), FieldValue::text(status));
    Record::seeded(id, fields)
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    stock: f64,
) -> Record {
    let mut fields = Fields::new();
    fields.insert("name".into(), FieldValue::text(name));
    fields.insert("description".into(), FieldValue::text(description));
    fields.insert("price".into(), FieldValue::number(price));
    fields.insert("category".into(), FieldValue::text(category));
    fields.insert("stock".into(), FieldValue::number(stock));
    Record::seeded(id, fields)
}

fn document(id: &str, title: &str, content: &str) -> Record {
    let mut fields = Fields::new();
    fields.insert("title".into(), FieldValue::text(title));
    fields.insert("content".into(), FieldValue::text(content));
    Record::seeded(id, fields)
}

pub fn users() -> Result<EntityStore> {
    EntityStore::with_records(vec![
        user("1", "John Doe", "john.doe@example.com", "Admin", "active"),
        user("2", "Jane Smith", "jane.smith@example.com", "Editor", "active"),
        user("3", "Bob Johnson", "bob.johnson@example.com", "Viewer", "inactive"),
        user("4", "Alice Brown", "alice.brown@example.com", "Editor", "pending"),
        user("5", "Mike Davis", "mike.davis@example.com", "Admin", "active"),
    ])
}

pub fn products() -> Result<EntityStore> {
    EntityStore::with_records(vec![
        product("1", "Product A", "Description of Product A", 25.99, "Electronics", 100.0),
        product("2", "Product B", "Description of Product B", 19.99, "Clothing", 50.0),
        product("3", "Product C", "Description of Product C", 49.99, "Home Goods", 20.0),
        product("4", "Product D", "Description of Product D", 12.50, "Books", 150.0),
        product("5", "Product E", "Description of Product E", 79.00, "Electronics", 30.0),
    ])
}

pub fn documents() -> Result<EntityStore> {
    EntityStore::with_records(vec![
        document("1", "Project Proposal", "This is the proposal for the project."),
        document("2", "Meeting Minutes", "Minutes from the last meeting."),
        document("3", "Design Specs", "Detailed design specifications."),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Success,
    Warning,
    Error,
}

/// One line of the dashboard's recent-activity feed.
#[derive(Debug, Clone)]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: &'static str,
}

pub fn activity_feed() -> Vec<Activity> {
    vec![
        Activity {
            kind: ActivityKind::Success,
            text: "User John Doe logged in",
        },
        Activity {
            kind: ActivityKind::Warning,
            text: "Low stock alert for Product X",
        },
        Activity {
            kind: ActivityKind::Error,
            text: "Failed payment transaction",
        },
    ]
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::schema::{DOCUMENTS, PRODUCTS, USERS};
    use crate::screen::Screen;

    pub fn users_screen() -> Screen {
        Screen::new(USERS.clone(), users().unwrap())
    }

    pub fn products_screen() -> Screen {
        Screen::new(PRODUCTS.clone(), products().unwrap())
    }

    pub fn documents_screen() -> Screen {
        Screen::new(DOCUMENTS.clone(), documents().unwrap())
    }
}
