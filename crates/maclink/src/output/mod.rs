//! Output formatting (JSON/text) for the report records.

pub mod color;
mod printable;

pub use color::{ColorMode, ColorScheme};
pub use printable::SOCKET_TABLE_HEADER;

use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Show extra details.
    pub details: bool,
    /// Pretty print (for JSON).
    pub pretty: bool,
    /// Color scheme, computed once at startup.
    pub color: ColorScheme,
}

/// Pretty JSON is rendered with a fixed four-space indent, matching the
/// Linux tools' `-p` output.
fn write_pretty<W: Write>(w: &mut W, json: &serde_json::Value) -> std::io::Result<()> {
    let mut ser =
        serde_json::Serializer::with_formatter(&mut *w, PrettyFormatter::with_indent(b"    "));
    json.serialize(&mut ser)?;
    Ok(())
}

/// Trait for types that can be printed.
pub trait Printable {
    /// Print as plain text.
    fn print_text<W: Write>(&self, w: &mut W, opts: &OutputOptions) -> std::io::Result<()>;

    /// Convert to JSON value.
    fn to_json(&self) -> serde_json::Value;

    /// Print in the specified format.
    fn print<W: Write>(
        &self,
        w: &mut W,
        format: OutputFormat,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => self.print_text(w, opts),
            OutputFormat::Json => {
                let json = self.to_json();
                if opts.pretty {
                    write_pretty(w, &json)?;
                } else {
                    serde_json::to_writer(&mut *w, &json)?;
                }
                writeln!(w)?;
                Ok(())
            }
        }
    }
}

/// Print a whole record list: sequential lines as text, one JSON array
/// as JSON.
pub fn print_all<W: Write, T: Printable>(
    w: &mut W,
    items: &[T],
    format: OutputFormat,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for item in items {
                item.print_text(w, opts)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::Value::Array(items.iter().map(Printable::to_json).collect());
            if opts.pretty {
                write_pretty(w, &json)?;
            } else {
                serde_json::to_writer(&mut *w, &json)?;
            }
            writeln!(w)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RouteKind, RouteRecord};

    #[test]
    fn test_print_all_json_array() {
        let routes = vec![
            RouteRecord::via_gateway("default", "192.168.1.1", "en0"),
            RouteRecord::blackhole("10.9.8.7/32"),
        ];
        let mut buf = Vec::new();
        print_all(
            &mut buf,
            &routes,
            OutputFormat::Json,
            &OutputOptions::default(),
        )
        .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["dst"], "default");
        assert_eq!(arr[1]["type"], "blackhole");
        assert_eq!(routes[1].kind, RouteKind::Blackhole);
    }

    #[test]
    fn test_pretty_indents_four_spaces() {
        let routes = vec![RouteRecord::via_gateway("default", "192.168.1.1", "en0")];
        let opts = OutputOptions {
            pretty: true,
            ..OutputOptions::default()
        };
        let mut buf = Vec::new();
        print_all(&mut buf, &routes, OutputFormat::Json, &opts).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // Depth 1 (the object inside the array) sits at exactly four
        // spaces, depth 2 at eight.
        assert_eq!(text.lines().nth(1), Some("    {"));
        assert!(text.lines().any(|l| l.starts_with("        \"dst\"")));
        assert!(!text.lines().any(|l| l.starts_with("  \"") || l == "  {"));
    }

    #[test]
    fn test_compact_and_pretty_agree() {
        let routes = vec![RouteRecord::via_gateway("default", "192.168.1.1", "en0")];
        let opts = OutputOptions::default();
        let pretty_opts = OutputOptions {
            pretty: true,
            ..opts
        };

        let mut compact = Vec::new();
        let mut pretty = Vec::new();
        print_all(&mut compact, &routes, OutputFormat::Json, &opts).unwrap();
        print_all(&mut pretty, &routes, OutputFormat::Json, &pretty_opts).unwrap();

        let a: serde_json::Value = serde_json::from_slice(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_slice(&pretty).unwrap();
        assert_eq!(a, b);
        assert_ne!(compact, pretty);
    }
}
