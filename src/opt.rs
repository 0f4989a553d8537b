//! Options parser.

use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Options {
    pub help: bool,
    pub version: bool,
    pub config_path: Option<String>,
    pub log_path: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub format_on_save: Option<bool>,
    pub tab_size: Option<usize>,
    pub timeout: Option<u64>,
    pub ops: bool,
    pub exec: Vec<String>,
    pub save: bool,
    pub files: Vec<String>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            help: false,
            version: false,
            config_path: None,
            log_path: None,
            rows: None,
            cols: None,
            format_on_save: None,
            tab_size: None,
            timeout: None,
            ops: false,
            exec: vec![],
            save: false,
            files: vec![],
        }
    }
}

impl Options {
    pub fn parse<T>(args: T) -> Result<Options>
    where
        T: IntoIterator<Item = String>,
    {
        let mut opts = Options::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" => opts.help = true,
                "--version" => opts.version = true,
                "--config" => opts.config_path = Some(expect_value(&arg, it.next())?),
                "--log" => opts.log_path = Some(expect_value(&arg, it.next())?),
                "--rows" => opts.rows = Some(parse_nonzero(&arg, it.next())?),
                "--cols" => opts.cols = Some(parse_nonzero(&arg, it.next())?),
                "--format-on-save" => opts.format_on_save = Some(true),
                "--no-format-on-save" => opts.format_on_save = Some(false),
                "--tab-size" => opts.tab_size = Some(parse_nonzero(&arg, it.next())?),
                "--timeout" => opts.timeout = Some(parse_arg(&arg, it.next())?),
                "--ops" => opts.ops = true,
                "--exec" => opts.exec.push(expect_value(&arg, it.next())?),
                "--save" => opts.save = true,
                arg if arg.starts_with("--") => return Err(Error::unexpected_arg(arg)),
                _ => opts.files.push(arg),
            }
        }
        Ok(opts)
    }
}

fn parse_arg<T>(arg: &str, next_arg: Option<String>) -> Result<T>
where
    T: FromStr,
{
    if let Some(value) = next_arg {
        value
            .parse::<T>()
            .or_else(|_| Err(Error::invalid_value(arg, &value)))
    } else {
        Err(Error::expected_value(arg))
    }
}

fn parse_nonzero(arg: &str, next_arg: Option<String>) -> Result<usize> {
    match parse_arg::<usize>(arg, next_arg)? {
        0 => Err(Error::invalid_value(arg, "0")),
        n => Ok(n),
    }
}

fn expect_value(arg: &str, next_arg: Option<String>) -> Result<String> {
    next_arg.ok_or_else(|| Error::expected_value(arg))
}
