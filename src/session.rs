//! One complete dump: request, collect, decode, archive.

use std::path::{Path, PathBuf};
use std::time::Duration;

use deepdump_midi_io::{SysExSink, SysExSource};
use deepdump_sysex::{DumpRequest, PatchRecord, SysExMessage};
use tracing::info;

use crate::archive::PatchArchive;
use crate::collector::{CancelToken, Collector};
use crate::error::{Error, Result};

/// A validated dump, ready to run against a pair of transports.
///
/// # Example
///
/// ```ignore
/// use deepdump::DumpSession;
///
/// let session = DumpSession::builder()
///     .bank("C")
///     .programs(0, 127)
///     .output_dir("backup")
///     .build()?;
///
/// let summary = session.run(&mut output, &mut input)?;
/// ```
#[derive(Debug, Clone)]
pub struct DumpSession {
    request: DumpRequest,
    output_dir: PathBuf,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

/// What a finished dump wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    /// Patch files in the order their responses arrived.
    pub patches: Vec<PathBuf>,
    pub index_path: PathBuf,
    /// Entries in the index; fewer than `patches` when names repeat.
    pub index_entries: usize,
}

impl DumpSession {
    pub fn builder() -> DumpSessionBuilder {
        DumpSessionBuilder::default()
    }

    pub fn request(&self) -> &DumpRequest {
        &self.request
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Sends the request, collects every reply, then writes the archive.
    ///
    /// Both transports are closed once the exchange is over, whether or not it
    /// succeeded. Files written before a failure are left in place.
    pub fn run<O, I>(&self, output: &mut O, input: &mut I) -> Result<DumpSummary>
    where
        O: SysExSink + ?Sized,
        I: SysExSource + ?Sized,
    {
        let responses = self.exchange(output, input);
        output.close();
        input.close();
        let responses = responses?;

        let mut archive = PatchArchive::new(&self.output_dir);
        let mut patches = Vec::with_capacity(responses.len());
        for response in &responses {
            let record = PatchRecord::decode(response)?;
            patches.push(archive.write_patch(&record)?);
        }
        let index_path = archive.finish()?;

        info!(
            "Dumped {} patch(es) from bank {} to {}",
            patches.len(),
            self.request.bank(),
            self.output_dir.display()
        );

        Ok(DumpSummary {
            patches,
            index_path,
            index_entries: archive.index().len(),
        })
    }

    fn exchange<O, I>(&self, output: &mut O, input: &mut I) -> Result<Vec<SysExMessage>>
    where
        O: SysExSink + ?Sized,
        I: SysExSource + ?Sized,
    {
        info!(
            "Requesting bank {} programs {}..={}",
            self.request.bank(),
            self.request.first(),
            self.request.last()
        );
        output.send(&self.request.to_message())?;

        let mut collector = Collector::new(self.request.expected_replies());
        if let Some(timeout) = self.timeout {
            collector = collector.timeout(timeout);
        }
        if let Some(token) = &self.cancel {
            collector = collector.cancel_token(token.clone());
        }
        collector.collect(input)
    }
}

#[derive(Debug, Default)]
pub struct DumpSessionBuilder {
    bank: Option<String>,
    programs: Option<(i32, i32)>,
    output_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl DumpSessionBuilder {
    /// Bank letter, `A` to `H`, either case.
    pub fn bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    /// Zero-based, inclusive program range.
    pub fn programs(mut self, first: i32, last: i32) -> Self {
        self.programs = Some((first, last));
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Give up if the replies have not all arrived within `timeout`.
    /// Without it the session waits indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Result<DumpSession> {
        let bank = self
            .bank
            .ok_or_else(|| Error::InvalidConfig("bank not set".to_string()))?;
        let (first, last) = self
            .programs
            .ok_or_else(|| Error::InvalidConfig("program range not set".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::InvalidConfig("output directory not set".to_string()))?;

        Ok(DumpSession {
            request: DumpRequest::parse(&bank, first, last)?,
            output_dir,
            timeout: self.timeout,
            cancel: self.cancel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use deepdump_sysex::Bank;

    #[test]
    fn test_builder_validates_range() {
        let session = DumpSession::builder()
            .bank("c")
            .programs(10, 15)
            .output_dir("out")
            .build()
            .unwrap();
        assert_eq!(session.request().bank(), Bank::C);
        assert_eq!(session.request().expected_replies(), 6);
        assert_eq!(session.output_dir(), Path::new("out"));

        for (bank, first, last) in [("I", 0, 0), ("A", 5, 4), ("A", 0, 128), ("A", -1, 3)] {
            let err = DumpSession::builder()
                .bank(bank)
                .programs(first, last)
                .output_dir("out")
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRange, "{bank} {first}..={last}");
        }
    }

    #[test]
    fn test_builder_requires_all_fields() {
        let err = DumpSession::builder().programs(0, 1).output_dir("out").build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = DumpSession::builder().bank("A").output_dir("out").build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = DumpSession::builder().bank("A").programs(0, 1).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
