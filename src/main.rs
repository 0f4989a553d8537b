//! Headless host for the *mako* text-buffer engine.
//!
//! Copyright 2024 David Edwards
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <https://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.
use mako::config::{Configuration, ConfigurationRef};
use mako::error::{Error, Result};
use mako::op::{self, OP_MAPPINGS};
use mako::opt::Options;
use mako::session::{Notification, Session};
use mako::sys::AsString;
use mako::term;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fmt::Write;
use std::fs::File;
use std::process::ExitCode;

/// Usage documentation for display to terminal.
const USAGE: &str = include_str!("include/usage.in");

// Version and build information.
const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_HASH: &str = env!("BUILD_HASH");
const BUILD_DATE: &str = env!("BUILD_DATE");

/// Number of rows when neither options nor the terminal provide one.
const DEFAULT_ROWS: usize = 24;

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn run() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    if opts.help {
        println!("{USAGE}");
        Ok(())
    } else if opts.version {
        println!("{PACKAGE_NAME} {PACKAGE_VERSION} ({BUILD_HASH} {BUILD_DATE})");
        Ok(())
    } else if opts.ops {
        print!("{}", ops_content());
        Ok(())
    } else {
        init_logging(&opts)?;
        run_opts(&opts)
    }
}

/// Sends log output to the file given by `--log`, otherwise only warnings and errors
/// are sent to standard error.
fn init_logging(opts: &Options) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    // Fails only if a logger is already set, which never happens here.
    let _ = if let Some(ref log_path) = opts.log_path {
        let file = File::create(log_path).map_err(|e| Error::io(log_path, e))?;
        WriteLogger::init(LevelFilter::Debug, config, file)
    } else {
        WriteLogger::init(LevelFilter::Warn, config, std::io::stderr())
    };
    Ok(())
}

fn run_opts(opts: &Options) -> Result<()> {
    // Load optional configuration from either standard location or path specified on
    // command line, and apply command line options afterwards since these override
    // all other settings.
    let mut config = if let Some(ref config_path) = opts.config_path {
        Configuration::load_file(config_path)?
    } else {
        Configuration::load()?
    };
    config.apply_opts(opts);
    let config = config.to_ref();

    let mut session = Session::new(config.clone());
    match opts.files.as_slice() {
        [] => (),
        [path] => report(session.open(path)?),
        [_, extra, ..] => return Err(Error::unexpected_arg(extra)),
    }

    // Without a terminal, the number of columns falls back to the column width of
    // the language profile.
    let size = term::try_size().map(|(rows, cols)| (rows as usize, cols as usize));
    let rows = opts
        .rows
        .or(size.map(|(rows, _)| rows.saturating_sub(1).max(1)))
        .unwrap_or(DEFAULT_ROWS);
    let gutter = gutter_width(&session);
    let cols = opts
        .cols
        .or(size.map(|(_, cols)| cols.saturating_sub(gutter).max(1)));
    session.resize(rows, cols);

    for ops in &opts.exec {
        report(op::apply_all(&mut session, ops)?);
    }
    if opts.save {
        report(session.save()?);
    }

    print!("{}", render_content(&session, &config));
    Ok(())
}

/// Reports notifications that a user would otherwise see in a status bar.
fn report(notes: Vec<Notification>) {
    for note in notes {
        match note {
            Notification::Saved { path, bytes } => {
                eprintln!("{}: {bytes} bytes written", path.as_string())
            }
            Notification::FormatFailed { cause } => eprintln!("format failed: {cause}"),
            Notification::Warning { message } => eprintln!("warning: {message}"),
            note => log::debug!("{note:?}"),
        }
    }
}

/// Returns the width of the line number column, including the current-line marker
/// and the trailing space, or `0` if line numbers are disabled.
fn gutter_width(session: &Session) -> usize {
    if session.profile().line_numbers {
        session.lines().line_count().to_string().len() + 2
    } else {
        0
    }
}

fn render_content(session: &Session, config: &ConfigurationRef) -> String {
    let gutter = gutter_width(session);
    let win = session.render();
    let mut out = String::new();
    for (n, line) in win.line_range().zip(win.lines.iter()) {
        let current = config.settings.highlight_line && n == win.current_line.line;
        let marker = if current { '>' } else { ' ' };
        if win.line_numbers {
            let width = gutter - 2;
            let _ = writeln!(out, "{marker}{n:>width$} {line}");
        } else {
            let _ = writeln!(out, "{line}");
        }
    }

    let name = session
        .path()
        .map(|path| path.as_string())
        .unwrap_or_else(|| "[new]".to_string());
    let modified = if session.is_modified() { " *" } else { "" };
    let _ = writeln!(
        out,
        "-- {name}{modified} {} ({})",
        session.cursor(),
        session.profile().name
    );
    out
}

fn ops_content() -> String {
    let width = OP_MAPPINGS
        .iter()
        .map(|(op, _, _)| op.len())
        .max()
        .unwrap_or(0)
        .max(op::INSERT_PREFIX.len() + 4);
    let mut out = String::new();
    for (op, _, desc) in OP_MAPPINGS {
        let _ = writeln!(out, "{op:<width$}   {desc}");
    }
    let insert = format!("{}TEXT", op::INSERT_PREFIX);
    let _ = writeln!(out, "{insert:<width$}   insert TEXT at cursor");
    out
}
