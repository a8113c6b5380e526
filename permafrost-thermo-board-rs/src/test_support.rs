//! Scripted bus doubles shared by the unit tests.

use std::collections::VecDeque;

use embedded_hal_async::spi::{self, Operation, SpiDevice};

/// One expected bus transaction and its scripted outcome.
#[derive(Debug)]
pub enum Transaction {
    /// Expect a write of exactly these bytes.
    Write([u8; 2]),
    /// Expect an in-place transfer of these bytes and respond with these.
    Transfer([u8; 2], [u8; 2]),
    /// Expect a write of these bytes and fail it.
    WriteError([u8; 2]),
    /// Expect a transfer of these bytes and fail it.
    TransferError([u8; 2]),
}

/// Error type reported by the scripted doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

impl spi::Error for MockSpiError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

/// A `SpiDevice` that checks each transaction against a script.
///
/// Panics on any deviation from the scripted order or frame contents, so
/// a passing test pins down the exact bus traffic.
pub struct MockSpi {
    script: VecDeque<Transaction>,
}

impl MockSpi {
    pub fn new(script: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = MockSpiError;
}

impl SpiDevice for MockSpi {
    async fn transaction(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> Result<(), MockSpiError> {
        assert_eq!(operations.len(), 1, "driver frames one operation per transaction");
        let expected = self
            .script
            .pop_front()
            .expect("bus transaction beyond the scripted sequence");

        match (&mut operations[0], expected) {
            (Operation::Write(frame), Transaction::Write(bytes)) => {
                assert_eq!(*frame, &bytes[..]);
                Ok(())
            }
            (Operation::Write(frame), Transaction::WriteError(bytes)) => {
                assert_eq!(*frame, &bytes[..]);
                Err(MockSpiError)
            }
            (Operation::TransferInPlace(frame), Transaction::Transfer(bytes, response)) => {
                assert_eq!(&frame[..], &bytes[..]);
                frame.copy_from_slice(&response);
                Ok(())
            }
            (Operation::TransferInPlace(frame), Transaction::TransferError(bytes)) => {
                assert_eq!(&frame[..], &bytes[..]);
                Err(MockSpiError)
            }
            (operation, expected) => {
                panic!("unexpected operation {:?} (script expected {:?})", operation, expected)
            }
        }
    }
}

/// A `SpiDevice` whose transactions never complete.
pub struct HangingSpi;

impl spi::ErrorType for HangingSpi {
    type Error = MockSpiError;
}

impl SpiDevice for HangingSpi {
    async fn transaction(
        &mut self,
        _operations: &mut [Operation<'_, u8>],
    ) -> Result<(), MockSpiError> {
        core::future::pending::<()>().await;
        unreachable!()
    }
}
