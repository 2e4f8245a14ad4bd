//! Reads zone files and prints them again.
//!
//! `$INCLUDE` directives are followed relative to the directory of the
//! including file. With `--strip-ttl`, the TTLs of all records are removed
//! before printing, leaving the default TTL of the zone in charge.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::exit;

use zonefile_lines::{Entry, Origin, Ttl, Zonefile};

/// The deepest nesting of included files we follow.
const MAX_DEPTH: usize = 16;

fn main() {
    use std::env;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();

    let mut args = env::args();
    let prog_name = args.next().unwrap_or_else(|| "read-zone".into());
    let mut strip_ttl = false;
    let mut zone_files = Vec::new();
    for arg in args {
        if arg == "--strip-ttl" {
            strip_ttl = true;
        } else {
            zone_files.push(PathBuf::from(arg));
        }
    }

    if zone_files.is_empty() {
        eprintln!(
            "Usage: {} [--strip-ttl] <path/to/zonefile> [<more>, <zones>, ...]",
            prog_name
        );
        exit(2);
    }

    for zone_file in zone_files {
        let mut out = String::new();
        if let Err(err) = flatten_zone(&zone_file, strip_ttl, 0, &mut out) {
            eprintln!(
                "\nAn error occurred while reading {}:",
                zone_file.display()
            );
            eprintln!("  Error: {err}");
            exit(1);
        }
        print!("{}", out);
    }
}

/// Renders a zone file and, in place of their directives, its includes.
///
/// Directives of an included file must not leak into the including one, so
/// the current `$ORIGIN` and `$TTL` are repeated after each include.
fn flatten_zone(
    path: &Path,
    strip_ttl: bool,
    depth: usize,
    out: &mut String,
) -> Result<(), Box<dyn std::error::Error>> {
    if depth > MAX_DEPTH {
        return Err(format!(
            "includes nested too deeply at {}",
            path.display()
        )
        .into());
    }
    let mut zone = Zonefile::load(&mut std::fs::File::open(path)?)?;
    let mut origin: Option<Origin> = None;
    let mut ttl: Option<Ttl> = None;
    while let Some(mut entry) = zone
        .next_entry()
        .map_err(|err| format!("{}:{}", path.display(), err))?
    {
        match &mut entry {
            Entry::Origin(value) => origin = Some(value.clone()),
            Entry::Ttl(value) => ttl = Some(value.clone()),
            Entry::Include(include) => {
                // The origin of the included file can only be passed on as
                // a directive of its own.
                write!(out, "; {}", include)?;
                if let Some(name) = include.origin.as_deref() {
                    write!(out, "{}", Origin::new(name, ""))?;
                }
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                let included = base.join(&include.path);
                flatten_zone(&included, strip_ttl, depth + 1, out)?;
                if let Some(origin) = &origin {
                    write!(out, "{}", origin)?;
                }
                if let Some(ttl) = &ttl {
                    write!(out, "{}", ttl)?;
                }
                continue;
            }
            Entry::Record(record) if strip_ttl => record.ttl.clear(),
            _ => {}
        }
        write!(out, "{}", entry)?;
    }
    Ok(())
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn include_does_not_leak_directives() {
        let dir = std::env::temp_dir()
            .join(format!("read-zone-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("parent.db"),
            "$ORIGIN example.com.\n\
             $TTL 1H\n\
             $INCLUDE child.db sub.example.com.\n\
             www A 192.0.2.1\n",
        )
        .unwrap();
        fs::write(
            dir.join("child.db"),
            "$TTL 5M\nns 300 A 192.0.2.53\n$ORIGIN other.test.\n",
        )
        .unwrap();

        let mut out = String::new();
        flatten_zone(&dir.join("parent.db"), true, 0, &mut out).unwrap();
        fs::remove_dir_all(&dir).ok();

        let entries = zonefile_lines::parse(&out).unwrap();
        let mut origin = None;
        let mut ttl = None;
        let mut seen = Vec::new();
        for entry in &entries {
            match entry {
                Entry::Origin(value) => origin = Some(value.name.as_str()),
                Entry::Ttl(value) => ttl = Some(value.value.as_str()),
                Entry::Record(record) => {
                    assert!(record.ttl.is_empty());
                    seen.push((record.owner.as_str(), origin, ttl));
                }
                _ => {}
            }
        }
        assert_eq!(
            seen,
            [
                ("ns", Some("sub.example.com."), Some("5M")),
                ("www", Some("example.com."), Some("1H")),
            ]
        );
    }
}
