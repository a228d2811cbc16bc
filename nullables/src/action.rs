//! Recording governor: remembers every payload it is invoked with.

use quad_governance::{ActionError, ExecutableAction};
use quad_types::Address;
use std::sync::Mutex;

pub struct RecordingAction {
    address: Address,
    calls: Mutex<Vec<Vec<u8>>>,
    failure: Option<String>,
}

impl RecordingAction {
    pub fn new(address: impl Into<Address>) -> Self {
        Self {
            address: address.into(),
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A governor that records the call and then rejects it with `reason`.
    pub fn failing(address: impl Into<Address>, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(address)
        }
    }

    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ExecutableAction for RecordingAction {
    fn address(&self) -> Address {
        self.address.clone()
    }

    fn invoke(&self, payload: &[u8]) -> Result<(), ActionError> {
        self.calls.lock().unwrap().push(payload.to_vec());
        match &self.failure {
            Some(reason) => Err(ActionError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}
