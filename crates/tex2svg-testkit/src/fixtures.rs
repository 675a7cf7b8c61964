//! Stand-in toolchain for testing
//!
//! Shell scripts that mimic `pdflatex` and `pdf2svg` closely enough to drive
//! the conversion pipeline without a TeX installation. They check the exact
//! argument contract the real tools are invoked with, so a wrong command line
//! fails the test instead of passing silently.
//!
//! - `pdflatex` copies `input.tex` to `input.pdf` in the output directory,
//!   writes `input.log` / `input.aux`, and fails with a TeX-style
//!   "Undefined control sequence" diagnostic when the source contains
//!   `\badcommand`.
//! - `pdf2svg` writes an SVG whose `<desc>` holds the (escaped) PDF content,
//!   so tests can tell which conversion produced a file.
//! - `pdf2svg-broken` always fails.

use lazy_static::lazy_static;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_PDFLATEX: &str = r#"#!/bin/sh
interaction=""
outdir=""
input=""
while [ $# -gt 0 ]; do
  case "$1" in
    -interaction=*) interaction="$1" ;;
    -output-directory) shift; outdir="$1" ;;
    -*) printf 'unexpected option %s\n' "$1" >&2; exit 2 ;;
    *) input="$1" ;;
  esac
  shift
done
if [ "$interaction" != "-interaction=nonstopmode" ] || [ -z "$outdir" ] || [ -z "$input" ]; then
  printf 'usage: pdflatex -interaction=nonstopmode -output-directory DIR FILE\n' >&2
  exit 2
fi
if [ ! -f "$input" ]; then
  printf '! I cannot find file %s.\n' "$input"
  exit 1
fi
base=$(basename "$input" .tex)
printf 'This is pdfTeX (fake)\n' > "$outdir/$base.log"
: > "$outdir/$base.aux"
if grep -q 'badcommand' "$input"; then
  printf '! Undefined control sequence.\n'
  printf 'l.3 \\badcommand\n'
  printf 'No pages of output.\n'
  exit 1
fi
cp "$input" "$outdir/$base.pdf"
printf 'Output written on %s/%s.pdf (1 page).\n' "$outdir" "$base"
exit 0
"#;

const FAKE_PDF2SVG: &str = r#"#!/bin/sh
if [ $# -ne 2 ]; then
  printf 'Usage: pdf2svg <in file.pdf> <out file.svg> [<page no>]\n' >&2
  exit 1
fi
if [ ! -f "$1" ]; then
  printf 'Unable to open the PDF file.\n' >&2
  exit 1
fi
{
  printf '<?xml version="1.0" encoding="UTF-8"?>\n'
  printf '<svg xmlns="http://www.w3.org/2000/svg" width="72pt" height="72pt" viewBox="0 0 72 72" version="1.1">\n'
  printf '<desc>'
  sed -e 's/&/\&amp;/g' -e 's/</\&lt;/g' -e 's/>/\&gt;/g' "$1"
  printf '</desc>\n'
  printf '<circle cx="36" cy="36" r="30" stroke="black" fill="none"/>\n'
  printf '</svg>\n'
} > "$2"
exit 0
"#;

const BROKEN_PDF2SVG: &str = r#"#!/bin/sh
printf 'Segmentation fault while rendering page 1\n' >&2
exit 3
"#;

/// Paths of the installed stand-in tools
#[derive(Debug)]
pub struct FakeToolchain {
    _dir: TempDir,
    pub typesetter: PathBuf,
    pub converter: PathBuf,
    pub broken_converter: PathBuf,
}

impl FakeToolchain {
    /// Install the scripts into a fresh temporary directory
    ///
    /// # Panics
    ///
    /// Panics if the scripts cannot be written or made executable.
    pub fn install() -> Self {
        let dir = TempDir::new().expect("Failed to create fake toolchain directory");
        let typesetter = write_script(dir.path(), "pdflatex", FAKE_PDFLATEX);
        let converter = write_script(dir.path(), "pdf2svg", FAKE_PDF2SVG);
        let broken_converter = write_script(dir.path(), "pdf2svg-broken", BROKEN_PDF2SVG);

        Self {
            _dir: dir,
            typesetter,
            converter,
            broken_converter,
        }
    }
}

lazy_static! {
    /// One installation per test binary
    ///
    /// Scripts are written once, before any test spawns them; writing an
    /// executable while another thread forks can make `exec` fail with
    /// ETXTBSY.
    static ref SHARED_FAKE_TOOLCHAIN: FakeToolchain = FakeToolchain::install();
}

/// Get the fake toolchain shared by every test in this binary
pub fn shared_fake_toolchain() -> &'static FakeToolchain {
    &SHARED_FAKE_TOOLCHAIN
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).expect("Failed to write fake tool script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake tool executable");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_fake_pdflatex_rejects_wrong_arguments() {
        let tools = shared_fake_toolchain();
        let status = Command::new(&tools.typesetter)
            .arg("input.tex")
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(2));
    }

    #[test]
    fn test_fake_pipeline_produces_svg() {
        let tools = shared_fake_toolchain();
        let work = TempDir::new().unwrap();
        let tex = work.path().join("input.tex");
        fs::write(&tex, "\\textbf{Hi} & <b>").unwrap();

        let status = Command::new(&tools.typesetter)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(work.path())
            .arg(&tex)
            .status()
            .unwrap();
        assert!(status.success());

        let svg = work.path().join("input.svg");
        let status = Command::new(&tools.converter)
            .arg(work.path().join("input.pdf"))
            .arg(&svg)
            .status()
            .unwrap();
        assert!(status.success());

        let content = fs::read_to_string(svg).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.contains("\\textbf{Hi} &amp; &lt;b&gt;"));
    }

    #[test]
    fn test_fake_pdflatex_reports_bad_command() {
        let tools = shared_fake_toolchain();
        let work = TempDir::new().unwrap();
        let tex = work.path().join("input.tex");
        fs::write(&tex, "\\badcommand").unwrap();

        let output = Command::new(&tools.typesetter)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(work.path())
            .arg(&tex)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Undefined control sequence"));
        assert!(!work.path().join("input.pdf").exists());
    }
}
