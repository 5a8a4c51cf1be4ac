//! 交互命令解析

use crate::models::Section;

/// 交互模式中的一条命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Preview(String),
    Check(Section),
    Uncheck(Section),
    Sections,
    Download,
    Close,
    Reload,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    /// 解析一行输入
    ///
    /// `preview` 后面的 ItemId 原样保留（不去除内部空格）
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let trimmed = line.trim_start();
        let (verb, rest) = match trimmed.split_once(' ') {
            Some((verb, rest)) => (verb, rest),
            None => (trimmed, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "preview" | "p" => ShellCommand::Preview(rest.to_string()),
            "check" => match rest.parse() {
                Ok(section) => ShellCommand::Check(section),
                Err(_) => ShellCommand::Unknown(line.to_string()),
            },
            "uncheck" => match rest.parse() {
                Ok(section) => ShellCommand::Uncheck(section),
                Err(_) => ShellCommand::Unknown(line.to_string()),
            },
            "sections" => ShellCommand::Sections,
            "download" | "d" => ShellCommand::Download,
            "close" => ShellCommand::Close,
            "reload" => ShellCommand::Reload,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}
