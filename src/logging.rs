use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Env, Target};

/// Writes everything to both `first` and `second`.
pub struct TeeWriter<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> TeeWriter<A, B> {
    pub fn new(first: A, second: B) -> TeeWriter<A, B> {
        TeeWriter { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Write, B: Write> Write for TeeWriter<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise. With a
/// `log_file`, records are also appended to that file.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(TeeWriter::new(io::stderr(), file))));
    }
    builder.init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::TeeWriter;

    #[test]
    fn test_tee_writes_both() -> Result<()> {
        let mut tee = TeeWriter::new(Vec::new(), Vec::new());
        writeln!(tee, "[INFO] report saved")?;
        write!(tee, "done")?;
        tee.flush()?;

        let (first, second) = tee.into_inner();
        assert_eq!(String::from_utf8(first)?, "[INFO] report saved\ndone");
        assert_eq!(String::from_utf8(second)?, "[INFO] report saved\ndone");

        Ok(())
    }
}
