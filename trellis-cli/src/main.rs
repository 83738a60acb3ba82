//! Trellis CLI
//!
//! Renders an element tree described in JSON to indented HTML, streaming the
//! output as it is produced.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Deserialize;
use trellis_common::warning::warn_once;
use trellis_dom::ElementNode;
use trellis_html::{
    Document, DocumentOptions, INDENT_WIDTH, RenderOptions, RenderReader, Tag, render_with,
};

/// Trellis — render JSON element trees as HTML
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"INPUT:
    An element is {"tag": "div", "text": "...", "children": [...], "attributes": {...}}.
    Leave out "children" (or set it to null) for a void element such as <br>.

EXAMPLES:
    # Render one element tree
    trellis tree.json

    # Render a full page from {"head": [...], "body": [...]}
    trellis --document page.json -o index.html

    # Read from stdin, indent by four spaces
    echo '{"tag": "p", "text": "hi", "children": []}' | trellis --indent 4
"#)]
struct Cli {
    /// JSON input file (stdin when absent or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Treat the input as {"head": [...], "body": [...]} and render a whole document
    #[arg(short, long)]
    document: bool,

    /// Nesting level to start the root element at
    #[arg(long, default_value_t = 0, conflicts_with = "document")]
    depth: usize,

    /// Spaces per nesting level
    #[arg(long, default_value_t = INDENT_WIDTH)]
    indent: usize,

    /// `lang` of the html element (document mode)
    #[arg(long, default_value = "en")]
    lang: String,

    /// Charset declared in the head (document mode)
    #[arg(long, default_value = "utf-8")]
    charset: String,

    /// Add a viewport meta element with this content (document mode)
    #[arg(long, value_name = "CONTENT")]
    viewport: Option<String>,

    /// Reject known elements that break their rules (void content, missing attributes)
    #[arg(long)]
    strict: bool,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Input shape for `--document`.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct DocumentInput {
    #[serde(default)]
    head: Vec<ElementNode>,
    #[serde(default)]
    body: Vec<ElementNode>,
}

/// A parsed and checked input, ready to render.
#[derive(Debug)]
enum Input {
    Tree(ElementNode),
    Page(Document),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = read_input(cli.input.as_deref())?;
    let input = load(cli, &source)?;

    match cli.output.as_deref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create '{}'", path.display()))?;
            let mut out = BufWriter::new(file);
            write_html(cli, &input, &mut out)
                .and_then(|()| out.flush().map_err(Into::into))
                .with_context(|| format!("failed to write '{}'", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            write_html(cli, &input, &mut out)
                .and_then(|()| out.flush().map_err(Into::into))
                .context("failed to write to stdout")
        }
    }
}

/// Read the whole JSON input from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        _ => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Parse `source` in the shape the flags ask for, checking it under
/// `--strict`.
fn load(cli: &Cli, source: &str) -> Result<Input> {
    if cli.document {
        let input: DocumentInput =
            serde_json::from_str(source).context("input is not a valid document description")?;
        if cli.strict {
            for node in input.head.iter().chain(&input.body) {
                check_tree(node)?;
            }
        }
        let options = DocumentOptions {
            lang: cli.lang.clone(),
            charset: cli.charset.clone(),
            viewport: cli.viewport.clone(),
        };
        Ok(Input::Page(Document::with_options(input.head, input.body, &options)))
    } else {
        let node: ElementNode =
            serde_json::from_str(source).context("input is not a valid element tree")?;
        if cli.strict {
            check_tree(&node)?;
        }
        Ok(Input::Tree(node))
    }
}

/// Apply [`Tag::check`] to every node with a known tag name.
fn check_tree(root: &ElementNode) -> Result<()> {
    for node in root.traverse() {
        match Tag::from_str(node.tag_name()) {
            Ok(tag) => tag.check(node)?,
            Err(_) => warn_once(
                "CLI",
                &format!("<{}> is not a known element; not checked", node.tag_name()),
            ),
        }
    }
    Ok(())
}

/// Stream the rendered bytes into `out`.
fn write_html(cli: &Cli, input: &Input, out: &mut impl Write) -> Result<()> {
    let options = RenderOptions {
        indent_width: cli.indent,
    };
    let _ = match input {
        Input::Tree(node) => io::copy(
            &mut RenderReader::new(render_with(node, cli.depth, options)),
            out,
        )?,
        Input::Page(doc) => io::copy(&mut RenderReader::new(doc.render_with(options)), out)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("trellis").chain(args.iter().copied())).unwrap()
    }

    fn html(cli: &Cli, source: &str) -> String {
        let input = load(cli, source).unwrap();
        let mut out = Vec::new();
        write_html(cli, &input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// A path in the temp dir unique to this process and `name`.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trellis-cli-{}-{name}", std::process::id()))
    }

    // ========== element trees ==========

    #[test]
    fn test_renders_tree() {
        let out = html(&cli(&[]), r#"{"tag": "p", "text": "a < b", "children": []}"#);
        assert_eq!(out, "<p>\n  a &lt; b\n</p>\n");
    }

    #[test]
    fn test_depth_and_indent() {
        let source = r#"{"tag": "div", "children": [{"tag": "br"}]}"#;
        let out = html(&cli(&["--depth", "1", "--indent", "4"]), source);
        assert_eq!(out, "    <div>\n        <br>\n    </div>\n");
    }

    #[test]
    fn test_depth_conflicts_with_document() {
        let result = Cli::try_parse_from(["trellis", "--document", "--depth", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_has_context() {
        let err = load(&cli(&[]), r#"{"tag": "p", "children": [}"#).unwrap_err();
        assert!(format!("{err:#}").starts_with("input is not a valid element tree: "));

        let err = load(&cli(&["--document"]), r#"{"head": 1}"#).unwrap_err();
        assert!(format!("{err:#}").starts_with("input is not a valid document description: "));
    }

    // ========== --strict ==========

    #[test]
    fn test_strict_rejects_broken_element() {
        let source = r#"{"tag": "img", "children": null}"#;
        let err = load(&cli(&["--strict"]), source).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"missing required attributes ["src", "alt"] on <img>"#
        );

        // Without the flag the same input renders.
        assert_eq!(html(&cli(&[]), source), "<img>\n");
    }

    #[test]
    fn test_strict_checks_nested_and_document_nodes() {
        let tree = r#"{"tag": "ul", "children": [{"tag": "li"}]}"#;
        let err = load(&cli(&["--strict"]), tree).unwrap_err();
        assert_eq!(err.to_string(), "<li> needs an end tag but the node has no child list");

        let page = r#"{"body": [{"tag": "br", "children": []}]}"#;
        let err = load(&cli(&["--strict", "--document"]), page).unwrap_err();
        assert_eq!(err.to_string(), "<br> is a void element but the node has a child list");
    }

    #[test]
    fn test_strict_accepts_unknown_tags() {
        let source = r#"{"tag": "x-widget", "children": []}"#;
        assert_eq!(html(&cli(&["--strict"]), source), "<x-widget>\n</x-widget>\n");
    }

    // ========== --document ==========

    #[test]
    fn test_document_matches_document_display() {
        let source = r#"{
            "head": [{"tag": "title", "text": "Home", "children": []}],
            "body": [{"tag": "p", "text": "hi", "children": []}]
        }"#;
        let expected = Document::new(
            [ElementNode::element("title").with_text("Home")],
            [ElementNode::element("p").with_text("hi")],
        )
        .to_string();

        assert_eq!(html(&cli(&["--document"]), source), expected);
    }

    #[test]
    fn test_document_options() {
        let args = [
            "--document",
            "--lang",
            "fr",
            "--charset",
            "latin1",
            "--viewport",
            "width=device-width",
        ];
        let expected = Document::with_options(
            Vec::new(),
            Vec::new(),
            &DocumentOptions {
                lang: "fr".to_string(),
                charset: "latin1".to_string(),
                viewport: Some("width=device-width".to_string()),
            },
        )
        .to_string();

        assert_eq!(html(&cli(&args), "{}"), expected);
    }

    // ========== files ==========

    #[test]
    fn test_reads_file_and_writes_output() {
        let input = temp_path("in.json");
        let output = temp_path("out.html");
        fs::write(&input, r#"{"tag": "hr"}"#).unwrap();

        let args = cli(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        run(&args).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "<hr>\n");
        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_missing_input_file() {
        let input = temp_path("does-not-exist.json");
        let err = run(&cli(&[input.to_str().unwrap()])).unwrap_err();
        assert_eq!(err.to_string(), format!("failed to read '{}'", input.display()));
    }

    #[test]
    fn test_invalid_input_leaves_no_output_file() {
        let input = temp_path("bad.json");
        let output = temp_path("bad.html");
        fs::write(&input, "not json").unwrap();

        let args = cli(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
        assert!(run(&args).is_err());
        assert!(!output.exists());
        let _ = fs::remove_file(&input);
    }
}
