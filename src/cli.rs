use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "citedit")]
#[command(author, version)]
#[command(about = "Edit org-cite citations: reorder, restyle, annotate and fix references")]
#[command(
    long_about = "citedit is a command-line editing engine for org-cite citations such as \
    [cite/t:see @doe99, p. 4; @roe2001]. Each command takes a document and a cursor offset, \
    locates the citation and reference at that offset and applies one edit: moving between \
    references, reordering them, changing the citation style, editing prefixes and suffixes, \
    or replacing unknown keys with close matches from a BibTeX bibliography."
)]
#[command(after_help = "\
EXAMPLES:

    # Swap the reference at byte offset 12 with the one after it
    citedit shift-right --offset 12 notes.org

    # Same, editing the file in place
    citedit shift-right --offset 12 --write notes.org

    # Show the change as a diff instead of printing the document
    citedit sort --offset 12 --diff notes.org

    # Report citation keys missing from the bibliography
    citedit check --bibliography refs.bib notes.org

    # List the citations of a document as JSON
    citedit citations notes.org

CONFIGURATION:

citedit looks for configuration files in this order:
  1. Explicit --config path
  2. citedit.toml or .citedit.toml in current/parent directories
  3. ~/.config/citedit/config.toml (XDG)
  4. Built-in defaults

Example .citedit.toml:

    default_command = \"\\\\citep\"
    ranker = \"levenshtein\"
    bibliography = [\"refs.bib\"]

    [styles]
    t = \"\\\\textcite\"")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, citedit will \
        search for .citedit.toml or citedit.toml in the current directory and its parents, \
        then fall back to ~/.config/citedit/config.toml."
    )]
    pub config: Option<PathBuf>,

    /// Bibliography files
    #[arg(long = "bibliography", short = 'b', global = true)]
    #[arg(help = "BibTeX/BibLaTeX file (repeatable); overrides the config")]
    pub bibliography: Vec<PathBuf>,
}

/// Document and cursor shared by every editing command.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Input file (stdin if not provided)
    #[arg(help = "Input file path")]
    pub file: Option<PathBuf>,

    /// Cursor position
    #[arg(long, short = 'o', default_value_t = 0)]
    #[arg(help = "Cursor byte offset in the document")]
    pub offset: usize,

    /// Edit the file in place
    #[arg(long, conflicts_with = "diff")]
    #[arg(help = "Write the edited document back to the input file")]
    pub write: bool,

    /// Print a diff instead of the edited document
    #[arg(long)]
    #[arg(help = "Show the edit as a unified diff")]
    pub diff: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and display the citation syntax tree for debugging
    #[command(after_help = "\
EXAMPLES:

    # Parse a file and show the tree
    citedit parse notes.org

    # Parse from stdin
    echo 'See [cite:@doe99].' | citedit parse")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// List every citation of a document as JSON
    Citations {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// Move to the next reference, crossing into the next citation
    Next(Target),
    /// Move to the previous reference, crossing into the previous citation
    Previous(Target),
    /// Move to the start of the citation, or the line start when already there
    Start(Target),
    /// Move to the end of the citation, or the line end when already there
    End(Target),
    /// Swap the reference at point with the one before it
    ShiftLeft(Target),
    /// Swap the reference at point with the one after it
    ShiftRight(Target),
    /// Sort the references of the citation by year, newest first
    Sort {
        #[command(flatten)]
        target: Target,

        /// Oldest first
        #[arg(long)]
        ascending: bool,
    },
    /// Set the citation style, or list the style table
    #[command(
        long_about = "Set the style of the citation at point. Without a token, prints the \
        configured style table (token and export command). Use --clear to remove the style \
        marker."
    )]
    Style {
        /// Style token such as t, p or a/f
        token: Option<String>,

        #[command(flatten)]
        target: Target,

        /// Remove the style marker
        #[arg(long, conflicts_with = "token")]
        clear: bool,
    },
    /// Delete the reference at point (the citation, if it is the only one)
    Delete(Target),
    /// Delete the reference at point and print it to stderr
    Kill(Target),
    /// Print the reference at point
    Copy(Target),
    /// Print the byte range of the reference at point
    Mark(Target),
    /// Replace the prefix and suffix of the reference at point
    Annotate {
        #[command(flatten)]
        target: Target,

        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, default_value = "")]
        suffix: String,
    },
    /// Replace the key at point with the closest bibliography key
    Suggest {
        #[command(flatten)]
        target: Target,

        /// Key to use instead of the top suggestion; must be among the suggestions
        #[arg(long)]
        pick: Option<String>,

        /// Only print the ranked suggestions
        #[arg(long)]
        list: bool,
    },
    /// Insert references at point
    Insert {
        #[command(flatten)]
        target: Target,

        /// Keys to insert
        #[arg(long = "key", short = 'k', required = true)]
        keys: Vec<String>,
    },
    /// List bibliography keys for completion
    Candidates,
    /// Report citation keys missing from the bibliography
    #[command(after_help = "\
EXAMPLES:

    # Report unknown keys
    citedit check -b refs.bib notes.org

    # Exit with code 1 when unknown keys are found
    citedit check --check -b refs.bib notes.org

    # Print the document with every key replaced by its closest match
    citedit check --fix -b refs.bib notes.org")]
    Check {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Exit with code 1 if issues are found
        #[arg(long)]
        check: bool,

        /// Apply suggested replacements
        #[arg(long)]
        fix: bool,
    },
}
