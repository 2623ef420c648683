use crate::md_node::{Node, Nodes};
use crate::output;
use crate::parse::{parse_with, InvalidMd, ParseOptions};
use crate::run::cli::OutputFormat;
use crate::run::RunOptions;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

/// The run's overall possible error.
#[derive(Debug)]
pub enum Error {
    /// The Markdown failed to parse.
    ///
    /// This comes from [`crate::parse_with`].
    MarkdownParse(InvalidMd),

    /// Couldn't read an input file.
    FileReadError(Input, io::Error),

    /// Couldn't write the results.
    Output(io::Error),
}

impl std::error::Error for Error {}

/// Stdin or an input file by path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Input {
    Stdin,
    FilePath(String),
}

impl Error {
    pub(crate) fn from_io_error(error: io::Error, file: Input) -> Self {
        Error::FileReadError(file, error)
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Stdin => f.write_str("stdin"),
            Input::FilePath(file) => write!(f, "file {file:?}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MarkdownParse(err) => {
                writeln!(f, "Markdown parse error:")?;
                writeln!(f, "{err}")
            }
            Error::FileReadError(file, err) => writeln!(f, "{err} while reading {file}"),
            Error::Output(err) => writeln!(f, "{err} while writing output"),
        }
    }
}

/// A simple facade for handling I/O.
///
/// This trait lets you do "I/O-y stuff" like mocking out stdin or reading files. The [`run`] method uses it.
pub trait OsFacade {
    /// Read stdin (or your mock of it) to a `String`.
    fn read_stdin(&self) -> io::Result<String>;

    /// Read a file path (or your mock of one) to a `String`.
    fn read_file(&self, path: &str) -> io::Result<String>;

    /// Get a writer for stdout (or your mock of it).
    fn stdout(&mut self) -> impl Write;

    /// Handle an error.
    fn write_error(&mut self, err: Error);

    /// Read a slice of file paths into a single, concatenated `String`.
    ///
    /// The default implementation treats the file path `"-"` as stdin. The first `"-"` reads all of stdin (via
    /// [`Self::read_stdin`]), and subsequent `"-"`s get silently ignored.
    fn read_all(&self, markdown_file_paths: &[String]) -> Result<String, Error> {
        if markdown_file_paths.is_empty() {
            return self.read_stdin().map_err(|err| Error::from_io_error(err, Input::Stdin));
        }
        let mut contents = String::new();
        let mut have_read_stdin = false;
        for path in markdown_file_paths {
            if path == "-" {
                if !have_read_stdin {
                    contents.push_str(
                        &self
                            .read_stdin()
                            .map_err(|err| Error::from_io_error(err, Input::Stdin))?,
                    );
                    have_read_stdin = true
                }
            } else {
                let path_contents = self
                    .read_file(path)
                    .map_err(|err| Error::from_io_error(err, Input::FilePath(path.to_string())))?;
                contents.push_str(&path_contents);
            }
            contents.push('\n');
        }
        Ok(contents)
    }
}

/// Runs gquery end to end.
///
/// This reads the inputs named in [`RunOptions::markdown_file_paths`] through the [OsFacade], parses them into a
/// single tree, selects the nodes of [`RunOptions::node_type`], and writes them to the facade's stdout in the
/// [`RunOptions::output`] format. Returns whether anything was selected; errors go to [`OsFacade::write_error`].
pub fn run(cli: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(cli, os) {
        Ok(ok) => ok,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(cli: &RunOptions, os: &mut impl OsFacade) -> Result<bool, Error> {
    let contents_str = os.read_all(&cli.markdown_file_paths)?;
    let mut options = ParseOptions::gfm();
    options.allow_unknown_markdown = cli.allow_unknown_markdown;
    let root = parse_with(&contents_str, &options).map_err(Error::MarkdownParse)?;

    let selected = select(&root, cli);
    tracing::trace!(node_type = %cli.node_type, within = ?cli.within, selected = selected.len(), "selected nodes");
    let found_any = !selected.is_empty();

    if !cli.quiet {
        let mut stdout = os.stdout();
        let written = match cli.output {
            OutputFormat::Plain => output::write_plain(&selected, &mut stdout),
            OutputFormat::Tree => output::write_tree(&selected, &mut stdout),
        };
        written.and_then(|_| stdout.flush()).map_err(Error::Output)?;
    }

    Ok(found_any)
}

fn select(root: &Node, cli: &RunOptions) -> Nodes {
    let Some(within) = cli.within else {
        return root.gquery(cli.node_type);
    };
    // Nested scopes can reach the same node more than once; keep the first.
    let mut seen = HashSet::new();
    root.gquery(within)
        .iter()
        .flat_map(|scope| scope.find(cli.node_type))
        .filter(|node| seen.insert(node.clone()))
        .collect()
}

/// Runs against in-memory inputs, and returns whether anything was selected along with everything written to stdout.
///
/// `files` maps each path in [`RunOptions::markdown_file_paths`] to its contents; a path not in it fails the run
/// the way a missing file would.
///
/// ```
/// use gquery::run::{run_in_memory, RunOptions};
/// use gquery::NodeType;
///
/// let options = RunOptions {
///     node_type: NodeType::Title,
///     ..RunOptions::default()
/// };
/// let (found, out) = run_in_memory(&options, "# Hello\n\ntext\n", &[]).unwrap();
/// assert!(found);
/// assert_eq!(out, "title \"Hello\"\n");
/// ```
pub fn run_in_memory(cli: &RunOptions, stdin: &str, files: &[(&str, &str)]) -> Result<(bool, String), Error> {
    let mut os = InMemoryOs {
        stdin,
        files,
        stdout: Vec::new(),
        error: None,
    };
    let found = run(cli, &mut os);
    match os.error {
        Some(err) => Err(err),
        None => Ok((found, String::from_utf8_lossy(&os.stdout).into_owned())),
    }
}

struct InMemoryOs<'a> {
    stdin: &'a str,
    files: &'a [(&'a str, &'a str)],
    stdout: Vec<u8>,
    error: Option<Error>,
}

impl OsFacade for InMemoryOs<'_> {
    fn read_stdin(&self) -> io::Result<String> {
        Ok(self.stdin.to_string())
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        self.files
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, contents)| contents.to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("File not found: {path}")))
    }

    fn stdout(&mut self) -> impl Write {
        &mut self.stdout
    }

    fn write_error(&mut self, err: Error) {
        self.error = Some(err);
    }
}
