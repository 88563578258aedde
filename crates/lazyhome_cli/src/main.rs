//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazyhome_core` linkage.
//! - Print the current week key and a preview grid from an in-memory store.

use lazyhome_core::db::open_db_in_memory;
use lazyhome_core::{Frequency, RoutineService, SqliteKvStore, WeekKey};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lazyhome_core ping={}", lazyhome_core::ping());
    println!("lazyhome_core version={}", lazyhome_core::core_version());

    let week = WeekKey::current();
    println!("current_week={week}");

    match preview_sample_week(week) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("preview failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn preview_sample_week(week: WeekKey) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let service = RoutineService::new(SqliteKvStore::try_new(&conn)?);
    service.chores().add("sample daily", None, Frequency::Daily)?;
    service.chores().add("sample weekly", None, Frequency::Weekly)?;

    let plan = service.preview(week)?;
    Ok(plan
        .iter()
        .map(|(day, tasks)| format!("{day} tasks={}", tasks.len()))
        .collect())
}
