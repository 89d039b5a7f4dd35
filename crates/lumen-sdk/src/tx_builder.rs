//! Transaction builder

use bytes::Bytes;
use lumen_types::{ContractId, Input, Output, Salt, Transaction, Witness};

use crate::types::{TransactionKind, TransactionRequest};
use crate::SdkError;

/// Gas limit used when a request does not set one
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Transaction builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    request: TransactionRequest,
}

impl TxBuilder {
    /// Start a script transaction
    pub fn script(script: impl Into<Bytes>) -> Self {
        Self {
            request: TransactionRequest {
                kind: TransactionKind::Script {
                    script: script.into(),
                    script_data: Bytes::new(),
                },
                ..Default::default()
            },
        }
    }

    /// Start a contract deployment; the bytecode becomes witness 0
    pub fn create(bytecode: impl Into<Bytes>) -> Self {
        Self {
            request: TransactionRequest {
                kind: TransactionKind::Create {
                    bytecode_witness_index: 0,
                    salt: Salt::ZERO,
                    static_contracts: vec![],
                },
                witnesses: vec![Witness::new(bytecode)],
                ..Default::default()
            },
        }
    }

    /// Set the gas price
    pub fn gas_price(mut self, price: u64) -> Self {
        self.request.gas_price = Some(price);
        self
    }

    /// Set the gas limit
    pub fn gas_limit(mut self, limit: u64) -> Self {
        self.request.gas_limit = Some(limit);
        self
    }

    /// Set the maturity height
    pub fn maturity(mut self, maturity: u64) -> Self {
        self.request.maturity = Some(maturity);
        self
    }

    /// Set the script data (ignored for deployments)
    pub fn script_data(mut self, data: impl Into<Bytes>) -> Self {
        if let TransactionKind::Script { script_data, .. } = &mut self.request.kind {
            *script_data = data.into();
        }
        self
    }

    /// Set the contract salt (ignored for scripts)
    pub fn salt(mut self, value: Salt) -> Self {
        if let TransactionKind::Create { salt, .. } = &mut self.request.kind {
            *salt = value;
        }
        self
    }

    /// Allow the deployed contract to call `contract` (ignored for scripts)
    pub fn static_contract(mut self, contract: ContractId) -> Self {
        if let TransactionKind::Create {
            static_contracts, ..
        } = &mut self.request.kind
        {
            static_contracts.push(contract);
        }
        self
    }

    /// Add an input
    pub fn input(mut self, input: Input) -> Self {
        self.request.inputs.push(input);
        self
    }

    /// Add an output
    pub fn output(mut self, output: Output) -> Self {
        self.request.outputs.push(output);
        self
    }

    /// Add a witness
    pub fn witness(mut self, witness: impl Into<Bytes>) -> Self {
        self.request.witnesses.push(Witness::new(witness));
        self
    }

    /// Finish as a request, leaving defaults unresolved
    pub fn into_request(self) -> TransactionRequest {
        self.request
    }

    /// Build the canonical transaction
    pub fn build(&self) -> Result<Transaction, SdkError> {
        build_transaction(&self.request)
    }
}

impl From<TxBuilder> for TransactionRequest {
    fn from(builder: TxBuilder) -> Self {
        builder.request
    }
}

/// Build a canonical transaction from a request.
///
/// Pure; fills defaults and checks that every index in the request points at
/// something that exists.
pub fn build_transaction(request: &TransactionRequest) -> Result<Transaction, SdkError> {
    let witness_count = request.witnesses.len();

    for (i, input) in request.inputs.iter().enumerate() {
        if let Some(index) = input.witness_index() {
            if index as usize >= witness_count {
                return Err(SdkError::TxBuild(format!(
                    "input {} refers to witness {} but only {} witnesses are present",
                    i, index, witness_count
                )));
            }
        }
    }

    for (i, output) in request.outputs.iter().enumerate() {
        if let Output::Contract { input_index, .. } = output {
            match request.inputs.get(*input_index as usize) {
                Some(Input::Contract { .. }) => {}
                _ => {
                    return Err(SdkError::TxBuild(format!(
                        "output {} refers to input {} which is not a contract input",
                        i, input_index
                    )))
                }
            }
        }
    }

    let gas_price = request.gas_price.unwrap_or(0);
    let gas_limit = request.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT);
    let maturity = request.maturity.unwrap_or(0);

    let tx = match &request.kind {
        TransactionKind::Script {
            script,
            script_data,
        } => Transaction::Script {
            gas_price,
            gas_limit,
            maturity,
            receipts_root: Default::default(),
            script: script.clone(),
            script_data: script_data.clone(),
            inputs: request.inputs.clone(),
            outputs: request.outputs.clone(),
            witnesses: request.witnesses.clone(),
        },
        TransactionKind::Create {
            bytecode_witness_index,
            salt,
            static_contracts,
        } => {
            if *bytecode_witness_index as usize >= witness_count {
                return Err(SdkError::TxBuild(format!(
                    "bytecode witness {} is missing ({} witnesses present)",
                    bytecode_witness_index, witness_count
                )));
            }
            Transaction::Create {
                gas_price,
                gas_limit,
                maturity,
                bytecode_witness_index: *bytecode_witness_index,
                salt: *salt,
                static_contracts: static_contracts.clone(),
                inputs: request.inputs.clone(),
                outputs: request.outputs.clone(),
                witnesses: request.witnesses.clone(),
            }
        }
    };

    Ok(tx)
}
