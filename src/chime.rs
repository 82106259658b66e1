use std::io::{self, Write};

/// 倒计时结束时的提示音
pub trait Chime {
    fn play(&mut self) -> io::Result<()>;
}

/// 终端响铃 (BEL)
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Chime for TerminalBell<W> {
    fn play(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = TerminalBell { out: Vec::new() };
        bell.play().unwrap();
        assert_eq!(bell.out, vec![0x07]);
    }
}
