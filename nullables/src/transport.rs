//! Nullable contract transport: scripted responses, recorded calls.

use async_trait::async_trait;
use chainvote_contracts::{ContractCall, ContractError, ContractKind, ContractTransport, TxReceipt};
use chainvote_types::TxHash;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Which side of the transport a recorded call went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Write,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub call: ContractCall,
}

#[derive(Default)]
struct State {
    /// Responses keyed by function name, used when no args-specific entry matches.
    reads: HashMap<&'static str, Result<Value, ContractError>>,
    /// Responses keyed by `(function, args)`.
    reads_with_args: HashMap<(&'static str, String), Result<Value, ContractError>>,
    /// Responses keyed by `(contract, function)`; checked first.
    reads_by_contract: HashMap<(ContractKind, &'static str), Result<Value, ContractError>>,
    /// Queued write outcomes; when empty, writes succeed with a fresh hash.
    writes: VecDeque<Result<TxHash, ContractError>>,
    /// Number of receipt polls answered with "still pending" before mining.
    pending_polls: u32,
    /// Mined receipts report a revert.
    revert: bool,
    /// Writes never resolve, like a wallet prompt left open.
    hold_writes: bool,
    next_hash: u8,
    calls: Vec<RecordedCall>,
    receipt_polls: u32,
}

/// A contract gateway that answers from a script instead of a chain.
///
/// Reads with no scripted response fail with a transport error.
#[derive(Default)]
pub struct NullTransport {
    state: Mutex<State>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer every read of `function` with `value`.
    pub fn on_read(&self, function: &'static str, value: Value) -> &Self {
        self.state().reads.insert(function, Ok(value));
        self
    }

    /// Answer reads of `function` with exactly these args.
    pub fn on_read_with(&self, function: &'static str, args: Vec<Value>, value: Value) -> &Self {
        self.state()
            .reads_with_args
            .insert((function, Value::Array(args).to_string()), Ok(value));
        self
    }

    /// Answer reads of `function` on one contract only.
    pub fn on_contract_read(
        &self,
        contract: ContractKind,
        function: &'static str,
        value: Value,
    ) -> &Self {
        self.state()
            .reads_by_contract
            .insert((contract, function), Ok(value));
        self
    }

    pub fn fail_read(&self, function: &'static str, err: ContractError) -> &Self {
        self.state().reads.insert(function, Err(err));
        self
    }

    /// Queue the outcome of the next write.
    pub fn enqueue_write(&self, result: Result<TxHash, ContractError>) -> &Self {
        self.state().writes.push_back(result);
        self
    }

    /// Answer the next `polls` receipt requests with "not mined yet".
    pub fn pending_for(&self, polls: u32) -> &Self {
        self.state().pending_polls = polls;
        self
    }

    /// Mine subsequent transactions as reverted.
    pub fn revert_receipts(&self, revert: bool) -> &Self {
        self.state().revert = revert;
        self
    }

    /// Leave subsequent writes waiting on the wallet forever.
    pub fn hold_writes(&self, hold: bool) -> &Self {
        self.state().hold_writes = hold;
        self
    }

    /// All calls made, in order (for assertions).
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn writes(&self) -> Vec<ContractCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.kind == CallKind::Write)
            .map(|c| c.call.clone())
            .collect()
    }

    /// How many times `function` reached the transport as a read.
    pub fn read_count(&self, function: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.kind == CallKind::Read && c.call.function == function)
            .count()
    }

    pub fn receipt_polls(&self) -> u32 {
        self.state().receipt_polls
    }

    /// Clear all state.
    pub fn reset(&self) {
        *self.state() = State::default();
    }
}

#[async_trait]
impl ContractTransport for NullTransport {
    async fn read(&self, call: &ContractCall) -> Result<Value, ContractError> {
        let mut state = self.state();
        state.calls.push(RecordedCall {
            kind: CallKind::Read,
            call: call.clone(),
        });
        let key = (call.function, Value::Array(call.args.clone()).to_string());
        state
            .reads_by_contract
            .get(&(call.kind, call.function))
            .or_else(|| state.reads_with_args.get(&key))
            .or_else(|| state.reads.get(call.function))
            .cloned()
            .unwrap_or_else(|| {
                Err(ContractError::transport(format!(
                    "no scripted response for {}",
                    call.function
                )))
            })
    }

    async fn write(&self, call: &ContractCall) -> Result<TxHash, ContractError> {
        let held = {
            let mut state = self.state();
            state.calls.push(RecordedCall {
                kind: CallKind::Write,
                call: call.clone(),
            });
            state.hold_writes
        };
        if held {
            return std::future::pending().await;
        }

        let mut state = self.state();
        match state.writes.pop_front() {
            Some(result) => result,
            None => {
                state.next_hash = state.next_hash.wrapping_add(1);
                Ok(TxHash::new([state.next_hash; 32]))
            }
        }
    }

    async fn receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>, ContractError> {
        let mut state = self.state();
        state.receipt_polls += 1;
        if state.pending_polls > 0 {
            state.pending_polls -= 1;
            return Ok(None);
        }
        Ok(Some(TxReceipt {
            hash: *hash,
            block_number: u64::from(state.receipt_polls),
            success: !state.revert,
        }))
    }
}
