use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use historyquery::cli::{Cli, Command};
use historyquery::config::Config;
use historyquery::{
    CancelToken, CompiledQuery, EntityKind, MatchHit, MatchMode, SearchEngine, SearchScope,
};
use historystore::CorpusStore;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let corpus_path = cli.corpus.unwrap_or_else(|| config.corpus_path.clone());

    info!("historyquery starting");

    let store = CorpusStore::open(&corpus_path)
        .context(format!("Failed to open corpus at {}", corpus_path.display()))?;

    match cli.command {
        Command::Context => {
            let meta = store.context();
            println!("{}", meta.title.bold());
            if !meta.description.is_empty() {
                println!("{}", meta.description);
            }
            for session in store.list_sessions() {
                println!("{} {}", session.id.cyan(), session.title);
            }
        }
        Command::Search {
            pattern,
            kind,
            count,
            from,
            limit,
            turns,
            snippet_context,
            per_entity,
            timeout_ms,
        } => {
            let query = CompiledQuery::compile(&pattern, kind)?;

            let scope = if turns.is_empty() {
                SearchScope::all()
            } else {
                let resolved: Vec<String> = turns
                    .iter()
                    .map(|prefix| store.resolve_turn(prefix).map(str::to_string))
                    .collect::<std::result::Result<_, _>>()?;
                SearchScope::turns(resolved)
            };

            let timeout = timeout_ms.unwrap_or(config.default_timeout_ms);
            let cancel = if timeout > 0 {
                CancelToken::with_timeout(Duration::from_millis(timeout))
            } else {
                CancelToken::none()
            };

            let mode = if per_entity {
                MatchMode::PerEntity
            } else {
                MatchMode::Occurrences
            };

            let engine = SearchEngine::new(&store).with_snippet_context(
                snippet_context.unwrap_or(config.default_snippet_context),
            );
            let page = engine.search(
                &query,
                &scope,
                from,
                limit.unwrap_or(config.default_limit),
                mode,
                &cancel,
            )?;

            if count {
                println!("{}", page.window.total_count);
            } else {
                for hit in &page.hits {
                    println!("{}", render_hit(hit));
                }
                let w = page.window;
                println!(
                    "{}",
                    format!("({}-{} of {} matches)", w.from, w.to, w.total_count).dimmed()
                );
            }
        }
        Command::Resolve { prefix } => {
            let resolved = store.resolve(&prefix)?;
            println!("{} {}", resolved.kind, resolved.id.cyan());
        }
        Command::Show { turn_id } => {
            let full_id = store.resolve_turn(&turn_id)?.to_string();
            println!("{}", store.content(&full_id)?);
        }
        Command::Stats => {
            let stats = store.stats();
            println!("Context: {}", store.context().title.cyan());
            println!("  Sessions: {}", stats.session_count);
            println!("  Turns: {}", stats.turn_count);
            println!("  Content bytes: {}", stats.content_bytes);
        }
    }

    Ok(())
}

fn render_hit(hit: &MatchHit) -> String {
    let location = format!(
        "{}:{}:{}",
        hit.session_id.yellow(),
        hit.entity_id.cyan(),
        hit.start.to_string().dimmed()
    );

    match (hit.kind, &hit.snippet) {
        (EntityKind::Content, Some(snippet)) => format!(
            "{} {}{}{}",
            location,
            snippet.before,
            hit.matched_text.red().bold(),
            snippet.after
        ),
        _ => format!("{} {}", location, hit.matched_text),
    }
}
