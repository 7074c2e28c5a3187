//! Demo driver: `termpick-demo [list|table|edit]`.

use std::fs;

use anyhow::{bail, Context};

use termpick::{select_from_list, Dataset, Editor, Error, Value};

fn main() -> anyhow::Result<()> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "list".to_string());
    match mode.as_str() {
        "list" => demo_list(),
        "table" => demo_table(),
        "edit" => demo_edit(),
        other => bail!("unknown mode {other:?}, expected list, table, or edit"),
    }
}

fn demo_list() -> anyhow::Result<()> {
    let items: Vec<String> = ["Option A", "Option B", "Option C"]
        .into_iter()
        .map(String::from)
        .collect();
    match select_from_list(&items)? {
        Some(choice) => println!("you selected: {choice}"),
        None => println!("nothing selected"),
    }
    Ok(())
}

fn demo_table() -> anyhow::Result<()> {
    let dataset = Dataset::from_table(vec![
        vec![Value::from("AGI"), Value::from(3i64), Value::from(true), Value::from(3.58)],
        vec![Value::from("BGM"), Value::from(2i64), Value::from(true), Value::from(0.9)],
        vec![Value::from("CGC"), Value::from(1i64), Value::from(false), Value::from(-93.20)],
        vec![Value::from("DPO"), Value::from(1829i64), Value::from(true), Value::from(3.58)],
    ])
    .with_header(["code", "count", "active", "score"]);

    match dataset.select()? {
        Some(selection) => println!("{selection:?}"),
        None => println!("nothing selected"),
    }
    Ok(())
}

fn demo_edit() -> anyhow::Result<()> {
    let text = match Editor::new().edit() {
        Ok(text) => text,
        Err(Error::Interrupted) => {
            println!("edit cancelled");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    fs::write("result.txt", &text).context("writing result.txt")?;
    println!("[RESULT]");
    println!("{text}");
    Ok(())
}
