// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::path::PathBuf;
use tokio::process::Command;

/// 外部脚本调用
///
/// `<interpreter> <script> <argument>`，载荷始终作为单独的一个 argv 元素传递，
/// 不经过shell，因此参数中的shell元字符不会改变执行的命令。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    /// 解释器命令
    pub program: String,
    /// 脚本路径
    pub script: PathBuf,
    /// 序列化后的JSON载荷
    pub argument: String,
}

impl ScriptInvocation {
    pub fn new(program: impl Into<String>, script: impl Into<PathBuf>, argument: String) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            argument,
        }
    }

    /// 构造待执行的进程命令
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(&self.script).arg(&self.argument);
        command
    }
}

/// 以shell引号形式展示调用，仅用于日志
impl fmt::Display for ScriptInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            shell_quote(&self.program),
            shell_quote(&self.script.to_string_lossy()),
            shell_quote(&self.argument)
        )
    }
}

/// 单引号转义，等价于 POSIX shell 的 `'...'` 引用
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}
