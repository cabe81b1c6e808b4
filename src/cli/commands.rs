use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "jot")]
#[command(version)]
#[command(about = "A plain-markdown note manager with selector-based refiling")]
#[command(
    long_about = "jot - A note manager for plain markdown files organized by heading hierarchy.\n\n\
    Subtrees are addressed by path-like selectors: `file.md#a/b` names the heading whose\n\
    text contains \"b\", nested under a heading containing \"a\". Matching is case-insensitive\n\
    substring matching, one level per segment. A leading '/' skips a level for documents\n\
    whose hierarchy starts deeper than level 1.\n\n\
    Examples:\n  \
    jot refile inbox.md#meeting work.md#projects   # Move a subtree\n  \
    jot refile --offset 120 notes.md '#archive'    # Move whatever contains byte 120\n  \
    jot peek --toc notes.md                        # One unambiguous selector per heading\n  \
    jot peek notes.md#projects                     # Print a single subtree\n  \
    jot resolve work.md#projects/backlog           # Validate a destination"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move a subtree to a new location
    ///
    /// Extracts the source subtree with all nested content, rewrites its
    /// heading levels to fit the destination, and splices it in. Missing
    /// destination headings are created on the way. The destination
    /// selector's file part defaults to the source file.
    Refile {
        /// Source selector (`file.md#path/to/heading`), or a plain file
        /// path when --offset is given
        source: String,

        /// Destination selector; `file.md` alone appends at end of file
        dest: String,

        /// Insert at the top of the destination subtree instead of the end
        #[arg(long)]
        prepend: bool,

        /// Refile the subtree containing this byte offset of SOURCE
        ///
        /// Editor integration: SOURCE is treated as a plain file path and
        /// the subtree under the cursor is moved, no selector needed.
        #[arg(long, value_name = "BYTES")]
        offset: Option<usize>,

        /// Output format for the refile summary
        #[arg(short = 'o', long, default_value = "plain")]
        output: OutputFormat,
    },

    /// Inspect a file's structure or print a single subtree
    ///
    /// With --toc (or a bare file path), lists one guaranteed-unambiguous
    /// selector per heading. With a full selector, prints that subtree.
    Peek {
        /// File for --toc mode, or full selector for one subtree
        target: String,

        /// List selectors for every heading instead of printing content
        #[arg(long)]
        toc: bool,

        /// Compress TOC selectors (known-word letters, initials,
        /// consonant folding); entries that resist compression are
        /// marked with '*'
        #[arg(long)]
        short: bool,

        /// Render the subtree for the terminal instead of raw markdown
        #[arg(long)]
        render: bool,

        /// Output format for --toc mode
        #[arg(short = 'o', long, default_value = "plain")]
        output: OutputFormat,
    },

    /// Validate a destination selector and show the insertion plan
    ///
    /// Resolves the selector against the destination file without writing
    /// anything: reports the byte offset, the heading level new content
    /// would take, and any headings that would be created.
    Resolve {
        /// Destination selector to validate
        dest: String,

        /// Plan for insertion at the top of the subtree instead of the end
        #[arg(long)]
        prepend: bool,

        /// Output format for the plan
        #[arg(short = 'o', long, default_value = "plain")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}
