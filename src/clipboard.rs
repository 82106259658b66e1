//! 剪贴板服务
//!
//! 复制按顺序尝试多个策略，前一个失败才会尝试下一个：
//! 1. 系统剪贴板命令（pbcopy / clip / wl-copy / xclip / xsel）
//! 2. OSC 52 终端转义序列
//! 3. 全部失败时交给调用方显示文本，由用户手动复制

use std::env;
use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::ClipboardConfig;
use crate::error::ClipboardError;
use crate::models::Topic;

pub const DEFAULT_TEMPLATE: &str = "【お題】{{topic}}\n【NGワード】{{ngWords}}";
pub const NG_SEPARATOR: &str = "・";

/// 用题目答案和 NG 词填充消息模板
pub fn format_copy_text(template: &str, topic: &Topic, ng_words: &[String]) -> String {
    let ng_text = ng_words.join(NG_SEPARATOR);
    template
        .replacen("{{topic}}", &topic.topic, 1)
        .replacen("{{ngWords}}", &ng_text, 1)
}

/// 单个复制策略
pub trait CopyStrategy {
    fn name(&self) -> &'static str;
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 复制结果
#[derive(Debug, Clone, PartialEq)]
pub enum CopyOutcome {
    /// 通过某个策略复制成功
    Copied(&'static str),
    /// 所有策略都失败，需要手动复制
    Manual(String),
}

pub struct Clipboard {
    strategies: Vec<Box<dyn CopyStrategy>>,
}

impl Clipboard {
    pub fn new(strategies: Vec<Box<dyn CopyStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn from_config(config: &ClipboardConfig) -> Self {
        let mut strategies: Vec<Box<dyn CopyStrategy>> = Vec::new();
        if config.native {
            strategies.push(Box::new(NativeClipboard::detect()));
        }
        if config.osc52 {
            strategies.push(Box::new(Osc52Clipboard::stdout()));
        }
        Self::new(strategies)
    }

    pub fn attempt_copy(&mut self, text: &str) -> CopyOutcome {
        for strategy in self.strategies.iter_mut() {
            match strategy.copy(text) {
                Ok(()) => {
                    tracing::info!(via = strategy.name(), "copied round text");
                    return CopyOutcome::Copied(strategy.name());
                }
                Err(e) => tracing::warn!(via = strategy.name(), "copy failed: {}", e),
            }
        }
        tracing::warn!("manual copy fallback invoked");
        CopyOutcome::Manual(text.to_string())
    }
}

/// 写入命令 stdin 时使用的编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    /// Windows `clip` 按 UTF-16LE 读取带 BOM 的输入
    Utf16Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub encoding: Encoding,
}

impl ClipCommand {
    const fn utf8(program: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            program,
            args,
            encoding: Encoding::Utf8,
        }
    }
}

fn payload(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf16Le => {
            let mut bytes = vec![0xFF, 0xFE];
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
            bytes
        }
    }
}

/// 调用系统剪贴板命令，按顺序尝试候选命令
pub struct NativeClipboard {
    commands: Vec<ClipCommand>,
}

impl NativeClipboard {
    pub fn new(commands: Vec<ClipCommand>) -> Self {
        Self { commands }
    }

    pub fn detect() -> Self {
        const NO_ARGS: &[&str] = &[];
        const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
        const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

        let mut commands = Vec::new();
        if cfg!(target_os = "macos") {
            commands.push(ClipCommand::utf8("pbcopy", NO_ARGS));
        } else if cfg!(windows) {
            commands.push(ClipCommand {
                program: "clip",
                args: NO_ARGS,
                encoding: Encoding::Utf16Le,
            });
        } else {
            if env::var_os("WAYLAND_DISPLAY").is_some() {
                commands.push(ClipCommand::utf8("wl-copy", NO_ARGS));
            }
            if env::var_os("DISPLAY").is_some() {
                commands.push(ClipCommand::utf8("xclip", XCLIP_ARGS));
                commands.push(ClipCommand::utf8("xsel", XSEL_ARGS));
            }
        }
        Self::new(commands)
    }

    fn run(command: &ClipCommand, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(command.program)
            .args(command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ClipboardError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            // stdin 在此作用域结束时关闭，命令才能读到 EOF
            if let Err(e) = stdin.write_all(&payload(text, command.encoding)) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(ClipboardError::Write(e));
            }
        }

        let status = child.wait().map_err(ClipboardError::Spawn)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} {}",
                command.program, status
            )))
        }
    }
}

impl CopyStrategy for NativeClipboard {
    fn name(&self) -> &'static str {
        "native"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::Unavailable("no clipboard command for this platform");
        for command in &self.commands {
            match Self::run(command, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(program = command.program, "clipboard command failed: {}", e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// 通过 OSC 52 转义序列让终端写入剪贴板
pub struct Osc52Clipboard<W: Write> {
    out: W,
    is_tty: bool,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let is_tty = out.is_terminal();
        Osc52Clipboard::new(out, is_tty)
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W, is_tty: bool) -> Self {
        Self { out, is_tty }
    }

    fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl<W: Write> CopyStrategy for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.is_tty {
            return Err(ClipboardError::Unavailable("stdout is not a terminal"));
        }
        self.out
            .write_all(Self::sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(ClipboardError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::topic;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 记录调用顺序的假策略
    struct FakeStrategy {
        name: &'static str,
        succeed: bool,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl CopyStrategy for FakeStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
            self.calls.borrow_mut().push(self.name);
            if self.succeed {
                Ok(())
            } else {
                Err(ClipboardError::Unavailable("fake"))
            }
        }
    }

    fn fake(
        name: &'static str,
        succeed: bool,
        calls: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Box<dyn CopyStrategy> {
        Box::new(FakeStrategy {
            name,
            succeed,
            calls: calls.clone(),
        })
    }

    #[test]
    fn test_format_copy_text() {
        let t = topic("1", &["a", "b", "c"]);
        let words = vec!["赤".to_string(), "果物".to_string(), "木".to_string()];

        let text = format_copy_text(DEFAULT_TEMPLATE, &t, &words);
        assert_eq!(text, "【お題】topic-1\n【NGワード】赤・果物・木");
    }

    #[test]
    fn test_format_replaces_first_placeholder_only() {
        let t = topic("1", &[]);
        let text = format_copy_text("{{topic}} {{topic}} / {{ngWords}}", &t, &[]);
        assert_eq!(text, "topic-1 {{topic}} / ");
    }

    #[test]
    fn test_first_strategy_success_stops() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut clipboard = Clipboard::new(vec![fake("one", true, &calls), fake("two", true, &calls)]);

        assert_eq!(clipboard.attempt_copy("x"), CopyOutcome::Copied("one"));
        assert_eq!(*calls.borrow(), vec!["one"]);
    }

    #[test]
    fn test_falls_back_to_next_strategy() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut clipboard =
            Clipboard::new(vec![fake("one", false, &calls), fake("two", true, &calls)]);

        assert_eq!(clipboard.attempt_copy("x"), CopyOutcome::Copied("two"));
        assert_eq!(*calls.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn test_exhausted_strategies_yield_manual_text() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut clipboard =
            Clipboard::new(vec![fake("one", false, &calls), fake("two", false, &calls)]);
        let text = "【お題】りんご\n【NGワード】赤・果物・木";

        assert_eq!(
            clipboard.attempt_copy(text),
            CopyOutcome::Manual(text.to_string())
        );
        assert_eq!(*calls.borrow(), vec!["one", "two"]);
    }

    #[test]
    fn test_osc52_writes_base64_sequence() {
        let mut osc = Osc52Clipboard::new(Vec::new(), true);
        osc.copy("hi").unwrap();
        assert_eq!(osc.out, b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn test_osc52_unavailable_without_tty() {
        let mut osc = Osc52Clipboard::new(Vec::new(), false);
        assert!(matches!(
            osc.copy("hi"),
            Err(ClipboardError::Unavailable(_))
        ));
        assert!(osc.out.is_empty());
    }

    #[test]
    fn test_native_unavailable_without_command() {
        let mut native = NativeClipboard::new(Vec::new());
        assert!(matches!(
            native.copy("hi"),
            Err(ClipboardError::Unavailable(_))
        ));
    }

    #[test]
    fn test_utf16_payload_has_bom() {
        assert_eq!(payload("あ", Encoding::Utf16Le), vec![0xFF, 0xFE, 0x42, 0x30]);
        assert_eq!(payload("あ", Encoding::Utf8), "あ".as_bytes().to_vec());
    }

    #[cfg(unix)]
    #[test]
    fn test_native_falls_back_to_next_command() {
        let mut native = NativeClipboard::new(vec![
            ClipCommand::utf8("ngword-no-such-clipboard-tool", &[]),
            ClipCommand::utf8("cat", &[]),
        ]);
        assert!(native.copy("【お題】りんご").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_native_reports_failure_of_last_command() {
        let mut native = NativeClipboard::new(vec![ClipCommand::utf8("false", &[])]);
        assert!(matches!(
            native.copy("hi"),
            Err(ClipboardError::CommandFailed(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_native_write_error_reaps_child() {
        // `true` 不读 stdin 直接退出，大块写入会得到 broken pipe
        let mut native = NativeClipboard::new(vec![ClipCommand::utf8("true", &[])]);
        let text = "x".repeat(4 * 1024 * 1024);
        assert!(matches!(native.copy(&text), Err(ClipboardError::Write(_))));
    }
}
