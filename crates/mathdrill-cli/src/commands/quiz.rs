//! The `mathdrill quiz` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use mathdrill_core::builder::SessionSpec;
use mathdrill_core::model::{Difficulty, PracticeSession};
use mathdrill_core::store::InMemorySessionStore;
use mathdrill_core::traits::SessionStore;
use mathdrill_core::QuizService;
use mathdrill_providers::config::load_config_from;
use mathdrill_providers::create_source;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    grade: i64,
    topic: String,
    difficulty: Option<String>,
    seed: Option<u64>,
    show_answers: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let difficulty = difficulty
        .map(|d| d.parse::<Difficulty>().map_err(|e| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config, seed)?;
    let store = Arc::new(InMemorySessionStore::new());
    let service = QuizService::new(source, store.clone());

    let public = service
        .create_session(SessionSpec::new(grade, topic, difficulty))
        .await?;
    let session = store
        .get(&public.id)
        .await?
        .context("generated session missing from store")?;

    match format.as_str() {
        "json" => {
            let json = if show_answers {
                serde_json::to_string_pretty(&session)?
            } else {
                serde_json::to_string_pretty(&public)?
            };
            println!("{json}");
        }
        _ => print_table(&session, show_answers),
    }

    Ok(())
}

fn print_table(session: &PracticeSession, show_answers: bool) {
    println!(
        "Grade {} · {} · {} ({} questions)\n",
        session.grade,
        session.topic,
        session.difficulty,
        session.num_questions()
    );

    let mut table = Table::new();
    let mut header = vec!["#", "Category", "Question"];
    if show_answers {
        header.push("Answer");
    }
    table.set_header(header);

    for (i, question) in session.questions.iter().enumerate() {
        let mut row = vec![
            Cell::new(i + 1),
            Cell::new(&question.category),
            Cell::new(&question.prompt),
        ];
        if show_answers {
            row.push(Cell::new(&question.answer));
        }
        table.add_row(row);
    }

    println!("{table}");
}
