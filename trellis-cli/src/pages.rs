//! Bundled demo pages.
//!
//! Each page is composed per invocation into its own builder; nothing is
//! shared between pages.

use serde::{Deserialize, Serialize};
use trellis_common::warning::warn_once;
use trellis_html::{Document, Fragment, SparklineOptions, TagError, attrs};
use trellis_store::{Store, StoreError};

/// Store key holding the last issued todo number.
pub const COUNTER_KEY: &str = "counter";

const TODO_CSS: &str = "
:root { font-size: 16px; }
* { box-sizing: border-box; }
body { max-width: 40rem; margin: 0 auto; padding: 1rem; font-family: sans-serif; }
.todo-form { margin-bottom: 2rem; display: flex; gap: 0.5rem; }
.todo-input { padding: 0.5rem; flex: 1; }
.add-btn { padding: 0.5rem 1rem; }
.todo-item { display: flex; align-items: center; padding: 0.5rem 0; gap: 0.5rem; }
.toggle-form { flex: 1; display: flex; align-items: center; gap: 0.5rem; }
.completed { text-decoration: line-through; color: #666; }
.delete-btn { padding: 0.25rem 0.5rem; background: #ff4444; color: white; border: none; }
";

/// A todo record as kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// What needs doing.
    pub text: String,
    /// Whether it is done.
    #[serde(default)]
    pub completed: bool,
}

/// Greeting page.
pub fn hello(greeting: &str) -> Result<Document, TagError> {
    let mut doc = Document::with_attrs(attrs![lang = "en"]);
    {
        let mut head = doc.enter("head", attrs![])?;
        head.tag_with("title", ["Trellis"], attrs![])?;
    }
    {
        let mut body = doc.enter("body", attrs![])?;
        body.tag_with("h1", [greeting], attrs![])?;
    }
    Ok(doc)
}

/// Store a new todo under the next zero-padded number.
///
/// Blank text is ignored and yields `None`.
pub fn add_todo(store: &mut Store, text: &str) -> Result<Option<String>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let counter = store.get_or(COUNTER_KEY, 0_u64)? + 1;
    store.set(COUNTER_KEY, &counter)?;
    let id = format!("{counter:06}");
    store.set(
        &id,
        &Todo {
            text: text.to_string(),
            completed: false,
        },
    )?;
    Ok(Some(id))
}

/// Flip the completed flag of todo `id`. Returns whether it existed.
pub fn toggle_todo(store: &mut Store, id: &str) -> Result<bool, StoreError> {
    let Some(mut todo) = store.get::<Todo>(id)? else {
        warn_once("TODO", &format!("no todo with id {id}"));
        return Ok(false);
    };
    todo.completed = !todo.completed;
    store.set(id, &todo)?;
    Ok(true)
}

/// Remove todo `id`. Returns whether it existed.
pub fn delete_todo(store: &mut Store, id: &str) -> Result<bool, StoreError> {
    let removed = store.delete(id)?;
    if !removed {
        warn_once("TODO", &format!("no todo with id {id}"));
    }
    Ok(removed)
}

/// All todos, newest first.
pub fn load_todos(store: &Store) -> Result<Vec<(String, Todo)>, StoreError> {
    let mut todos = Vec::new();
    for (key, value) in store.iter()? {
        if key == COUNTER_KEY {
            continue;
        }
        let todo: Todo = serde_json::from_value(value.clone())?;
        todos.push((key.to_string(), todo));
    }
    todos.reverse();
    Ok(todos)
}

/// One todo row: a toggle form and a delete form.
pub fn todo_item(id: &str, todo: &Todo) -> Result<Fragment, TagError> {
    let mut item = Fragment::with_root("div", attrs![cls = "todo-item"])?;
    {
        let mut form = item.enter(
            "form",
            attrs![
                method = "POST",
                action = format!("/toggle/{id}"),
                cls = "toggle-form",
            ],
        )?;
        form.tag(
            "input",
            attrs![
                type_ = "checkbox",
                checked = todo.completed,
                onchange = "this.form.submit()",
            ],
        )?;
        let class = if todo.completed {
            "todo-text completed"
        } else {
            "todo-text"
        };
        form.tag_with("span", [&todo.text], attrs![cls = class])?;
    }
    {
        let mut form = item.enter(
            "form",
            attrs![
                method = "POST",
                action = format!("/delete/{id}"),
                cls = "delete-form",
            ],
        )?;
        form.tag_with("button", ["Delete"], attrs![type_ = "submit", cls = "delete-btn"])?;
    }
    Ok(item)
}

/// The todo list page.
pub fn todo_page(todos: &[(String, Todo)]) -> Result<Document, TagError> {
    let mut doc = Document::with_attrs(attrs![lang = "en"]);
    {
        let mut head = doc.enter("head", attrs![])?;
        head.tag_with("title", ["Todo List"], attrs![])?;
        head.tag("meta", attrs![charset = "utf-8"])?;
        head.tag(
            "meta",
            attrs![
                name = "viewport",
                content = "width=device-width, initial-scale=1",
            ],
        )?;
        head.tag_with("style", [TODO_CSS], attrs![])?;
    }
    {
        let mut body = doc.enter("body", attrs![])?;
        body.tag_with("h1", ["Todo List"], attrs![])?;
        {
            let mut form = body.enter(
                "form",
                attrs![method = "POST", action = "/add", cls = "todo-form"],
            )?;
            form.tag(
                "input",
                attrs![
                    type_ = "text",
                    name = "todo",
                    placeholder = "Add a new todo",
                    required = true,
                    cls = "todo-input",
                ],
            )?;
            form.tag_with("button", ["Add"], attrs![type_ = "submit", cls = "add-btn"])?;
        }
        for (id, todo) in todos {
            body.attach(&todo_item(id, todo)?);
        }
    }
    Ok(doc)
}

/// A markdown file as a standalone page.
pub fn markdown_document(title: &str, text: &str) -> Result<Document, TagError> {
    let mut doc = Document::with_attrs(attrs![lang = "en"]);
    {
        let mut head = doc.enter("head", attrs![])?;
        head.tag("meta", attrs![charset = "utf-8"])?;
        head.tag_with("title", [title], attrs![])?;
    }
    doc.within("body", attrs![], |body| {
        body.markdown(text);
        Ok::<(), TagError>(())
    })?;
    Ok(doc)
}

/// A markdown file as an embeddable fragment.
pub fn markdown_fragment(text: &str) -> Fragment {
    let mut fragment = Fragment::new();
    fragment.markdown(text);
    fragment
}

/// A sparkline wrapped in a figure.
pub fn sparkline_figure(values: &[f64], options: &SparklineOptions) -> Result<Fragment, TagError> {
    let mut figure = Fragment::with_root("figure", attrs![cls = "sparkline-figure"])?;
    figure.sparkline(values, options);
    Ok(figure)
}
