use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use citedit::actions::{self, Completion};
use citedit::diagnostics::{Diagnostic, fix_edits};
use citedit::engine::{Order, suggest_keys};
use citedit::select::{FirstCandidate, Preselected, Selector};
use citedit::{
    Bibliography, BibtexIndex, CitationData, CiteError, Config, Context, Outcome, parse,
};

mod cli;
use cli::{Cli, Commands, Target};

fn read_all(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn start_dir_for(input_path: &Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(p) = input_path {
        Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf())
    } else {
        std::env::current_dir()
    }
}

fn load_config(explicit: Option<&Path>, file: &Option<PathBuf>) -> io::Result<Config> {
    let start_dir = start_dir_for(file)?;
    let (cfg, cfg_path) = citedit::config::load(explicit, &start_dir)?;

    if let Some(path) = &cfg_path {
        log::debug!("Using config from: {}", path.display());
    } else {
        log::debug!("Using default config");
    }
    Ok(cfg)
}

/// Bibliography files from the command line, else from the config. Load
/// failures end the process with the error message.
fn load_bibliography(cli_paths: &[PathBuf], cfg: &Config) -> BibtexIndex {
    let paths = if cli_paths.is_empty() {
        cfg.bibliography.as_slice()
    } else {
        cli_paths
    };
    if paths.is_empty() {
        log::warn!("No bibliography configured");
    }
    BibtexIndex::load(paths).unwrap_or_else(|err| fail(err))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn print_diff(file_path: &str, original: &str, edited: &str) {
    let diff = TextDiff::from_lines(original, edited);

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!("---");
        }

        println!("Diff in {}:{}:", file_path, group[0].old_range().start + 1);

        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", "\x1b[31m"),
                    ChangeTag::Insert => ("+", "\x1b[32m"),
                    ChangeTag::Equal => (" ", "\x1b[0m"),
                };

                print!("{}{}{}", style, sign, change.value());

                if change.tag() != ChangeTag::Equal {
                    print!("\x1b[0m");
                }
            }
        }
    }
}

/// Write the edited document where `target` asks for it and report the new
/// cursor and any warnings on stderr.
fn emit(target: &Target, input: &str, outcome: &Outcome) -> io::Result<()> {
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }

    let output = outcome.apply(input);
    if target.diff {
        let file_name = target
            .file
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or("<stdin>");
        print_diff(file_name, input, &output);
    } else if target.write {
        let Some(path) = &target.file else {
            fail("--write requires an input file");
        };
        if output != input {
            fs::write(path, &output)?;
            log::info!("Wrote {}", path.display());
        }
    } else {
        print!("{output}");
    }

    eprintln!("cursor: {}", outcome.cursor);
    Ok(())
}

/// Run an editing action against `target` and emit its result.
fn edit<F>(target: &Target, cfg: &Config, action: F) -> io::Result<()>
where
    F: FnOnce(&Context) -> Result<Outcome, CiteError>,
{
    let input = read_all(target.file.as_ref())?;
    let ctx = Context::new(&input, target.offset, cfg);
    let outcome = action(&ctx).unwrap_or_else(|err| fail(err));
    emit(target, &input, &outcome)
}

/// Run a non-editing action and return its outcome.
fn inspect<F>(target: &Target, cfg: &Config, action: F) -> io::Result<Outcome>
where
    F: FnOnce(&Context) -> Result<Outcome, CiteError>,
{
    let input = read_all(target.file.as_ref())?;
    let ctx = Context::new(&input, target.offset, cfg);
    Ok(action(&ctx).unwrap_or_else(|err| fail(err)))
}

#[derive(Serialize)]
struct ReferenceListing<'a> {
    key: &'a str,
    prefix: &'a str,
    suffix: &'a str,
    begin: usize,
    end: usize,
}

#[derive(Serialize)]
struct CitationListing<'a> {
    begin: usize,
    end: usize,
    style: Option<&'a str>,
    command: &'a str,
    global_prefix: Option<&'a str>,
    global_suffix: Option<&'a str>,
    references: Vec<ReferenceListing<'a>>,
}

fn list_citations(citations: &[CitationData], cfg: &Config) -> io::Result<String> {
    let table = cfg.style_table();
    let listing: Vec<CitationListing> = citations
        .iter()
        .map(|c| CitationListing {
            begin: c.begin(),
            end: c.end(),
            style: c.style.as_deref(),
            command: table.resolve_command(c.style.as_deref()),
            global_prefix: c.global_prefix.as_deref(),
            global_suffix: c.global_suffix.as_deref(),
            references: c
                .references
                .iter()
                .map(|r| ReferenceListing {
                    key: &r.key,
                    prefix: &r.prefix,
                    suffix: &r.suffix,
                    begin: r.begin(),
                    end: r.end(),
                })
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&listing).map_err(io::Error::other)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let explicit = cli.config.as_deref();

    match &cli.command {
        Commands::Parse { file } => {
            let input = read_all(file.as_ref())?;
            let tree = parse(&input);
            println!("{:#?}", tree);
            Ok(())
        }
        Commands::Citations { file } => {
            let cfg = load_config(explicit, file)?;
            let input = read_all(file.as_ref())?;
            let citations = citedit::citations(&input);
            println!("{}", list_citations(&citations, &cfg)?);
            Ok(())
        }
        Commands::Next(target)
        | Commands::Previous(target)
        | Commands::Start(target)
        | Commands::End(target) => {
            let cfg = load_config(explicit, &target.file)?;
            let action: fn(&Context) -> Result<Outcome, CiteError> = match &cli.command {
                Commands::Next(_) => actions::next_reference,
                Commands::Previous(_) => actions::previous_reference,
                Commands::Start(_) => actions::goto_citation_start,
                _ => actions::goto_citation_end,
            };
            let outcome = inspect(target, &cfg, action)?;
            println!("{}", outcome.cursor);
            Ok(())
        }
        Commands::ShiftLeft(target) => {
            let cfg = load_config(explicit, &target.file)?;
            edit(target, &cfg, actions::shift_left)
        }
        Commands::ShiftRight(target) => {
            let cfg = load_config(explicit, &target.file)?;
            edit(target, &cfg, actions::shift_right)
        }
        Commands::Sort { target, ascending } => {
            let cfg = load_config(explicit, &target.file)?;
            let bibliography = load_bibliography(&cli.bibliography, &cfg);
            let order = if *ascending {
                Order::Ascending
            } else {
                Order::Descending
            };
            edit(target, &cfg, |ctx| {
                actions::sort_by_year(ctx, &bibliography, order)
            })
        }
        Commands::Style {
            token,
            target,
            clear,
        } => {
            let cfg = load_config(explicit, &target.file)?;
            if !clear && token.is_none() {
                let table = cfg.style_table();
                for entry in table.entries() {
                    println!("{}\t{}", entry.token, entry.command);
                }
                println!("(default)\t{}", table.default_command());
                return Ok(());
            }
            edit(target, &cfg, |ctx| {
                actions::update_style(ctx, token.as_deref())
            })
        }
        Commands::Delete(target) => {
            let cfg = load_config(explicit, &target.file)?;
            edit(target, &cfg, actions::delete_reference)
        }
        Commands::Kill(target) => {
            let cfg = load_config(explicit, &target.file)?;
            edit(target, &cfg, |ctx| {
                let outcome = actions::kill_reference(ctx)?;
                if let Some(text) = &outcome.text {
                    eprintln!("killed: {text}");
                }
                Ok(outcome)
            })
        }
        Commands::Copy(target) => {
            let cfg = load_config(explicit, &target.file)?;
            let outcome = inspect(target, &cfg, actions::copy_reference)?;
            if let Some(text) = outcome.text {
                println!("{text}");
            }
            Ok(())
        }
        Commands::Mark(target) => {
            let cfg = load_config(explicit, &target.file)?;
            let outcome = inspect(target, &cfg, actions::mark_reference)?;
            if let Some(range) = outcome.selection {
                println!("{}..{}", usize::from(range.start()), usize::from(range.end()));
            }
            Ok(())
        }
        Commands::Annotate {
            target,
            prefix,
            suffix,
        } => {
            let cfg = load_config(explicit, &target.file)?;
            edit(target, &cfg, |ctx| {
                actions::update_annotation(ctx, prefix, suffix)
            })
        }
        Commands::Suggest { target, pick, list } => {
            let cfg = load_config(explicit, &target.file)?;
            let bibliography = load_bibliography(&cli.bibliography, &cfg);

            if *list {
                let input = read_all(target.file.as_ref())?;
                let ctx = Context::new(&input, target.offset, &cfg);
                let reference = actions::find_reference_at(ctx.tree(), ctx.offset)
                    .unwrap_or_else(|| fail(CiteError::NotOnReference));
                let pool = bibliography.keys();
                let mut ranked = suggest_keys(
                    &reference.key(),
                    pool.iter().map(String::as_str),
                    &cfg.ranker,
                );
                ranked.truncate(cfg.max_suggestions);
                for key in ranked {
                    println!("{key}");
                }
                return Ok(());
            }

            let mut selector: Box<dyn Selector> = match pick {
                Some(key) => Box::new(Preselected(vec![key.clone()])),
                None => Box::new(FirstCandidate),
            };
            edit(target, &cfg, |ctx| {
                actions::replace_key_with_suggestion(ctx, &bibliography, selector.as_mut())
            })
        }
        Commands::Insert { target, keys } => {
            let cfg = load_config(explicit, &target.file)?;
            let bibliography = load_bibliography(&cli.bibliography, &cfg);
            if bibliography.is_empty() {
                return edit(target, &cfg, |ctx| actions::insert_keys(ctx, keys));
            }

            for key in keys.iter().filter(|key| !bibliography.contains(key)) {
                eprintln!("warning: skipping '{key}', not in the bibliography");
            }
            let mode = if keys.len() > 1 {
                Completion::Multiple
            } else {
                Completion::Single
            };
            let mut selector = Preselected(keys.clone());
            edit(target, &cfg, |ctx| {
                actions::complete_key(ctx, &bibliography, &mut selector, mode)
            })
        }
        Commands::Candidates => {
            let cfg = load_config(explicit, &None)?;
            let bibliography = load_bibliography(&cli.bibliography, &cfg);
            for candidate in actions::key_candidates(&bibliography, &cfg) {
                match candidate.annotation {
                    Some(annotation) => println!("{}\t{annotation}", candidate.key),
                    None => println!("{}", candidate.key),
                }
            }
            Ok(())
        }
        Commands::Check { file, check, fix } => {
            let cfg = load_config(explicit, file)?;
            let bibliography = load_bibliography(&cli.bibliography, &cfg);

            let input = read_all(file.as_ref())?;
            let tree = parse(&input);
            let diagnostics = citedit::check::check_keys(&tree, &input, &bibliography, &cfg);

            if diagnostics.is_empty() {
                if !check {
                    println!("No issues found");
                }
                return Ok(());
            }

            if *fix {
                let fixed_output = citedit::edit::apply_all(&input, fix_edits(&diagnostics));
                print!("{}", fixed_output);
            } else {
                print_diagnostics(&diagnostics, file.as_ref());
            }

            if *check {
                std::process::exit(1);
            }

            Ok(())
        }
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic], file: Option<&PathBuf>) {
    let file_name = file.and_then(|p| p.to_str()).unwrap_or("<stdin>");

    for diag in diagnostics {
        println!(
            "\x1b[33mwarning\x1b[0m[{}]: {} at {}:{}:{}",
            diag.code, diag.message, file_name, diag.location.line, diag.location.column
        );

        if let Some(fix) = &diag.fix {
            println!("  \x1b[36mhelp\x1b[0m: {}", fix.message);
        }
    }

    println!("\nFound {} issue(s)", diagnostics.len());
}
