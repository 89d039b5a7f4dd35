//! Transaction types for Lumen

use bytes::Bytes;
use sha2::{Digest, Sha256};

use crate::codec::{put_bytes, put_list, put_word, Decode, DecodeError, Encode, Reader};
use crate::primitives::{Address, Bytes32, Color, ContractId, Salt};
use crate::Word;

const TX_SCRIPT: Word = 0;
const TX_CREATE: Word = 1;

const INPUT_COIN: Word = 0;
const INPUT_CONTRACT: Word = 1;

const OUTPUT_COIN: Word = 0;
const OUTPUT_CONTRACT: Word = 1;
const OUTPUT_WITHDRAWAL: Word = 2;
const OUTPUT_CHANGE: Word = 3;
const OUTPUT_VARIABLE: Word = 4;
const OUTPUT_CONTRACT_CREATED: Word = 5;

/// Reference to an output of a previous transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct UtxoId {
    /// Transaction that created the output
    pub tx_id: Bytes32,
    /// Index of the output within that transaction
    pub output_index: u8,
}

impl UtxoId {
    /// Create a new UTXO reference
    pub fn new(tx_id: Bytes32, output_index: u8) -> Self {
        Self {
            tx_id,
            output_index,
        }
    }
}

impl Encode for UtxoId {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        self.tx_id.encode_to(buf);
        put_word(buf, self.output_index as Word);
    }
}

impl Decode for UtxoId {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tx_id: Bytes32::decode_from(reader)?,
            output_index: reader.word_u8("output_index")?,
        })
    }
}

/// Transaction input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Spend a coin
    Coin {
        /// Coin being spent
        utxo_id: UtxoId,
        /// Coin owner
        owner: Address,
        /// Coin amount
        amount: Word,
        /// Coin asset color
        color: Color,
        /// Index of the witness that authorizes the spend
        witness_index: u8,
        /// Block height before which the coin cannot be spent
        maturity: Word,
        /// Predicate bytecode (empty when spent by signature)
        predicate: Bytes,
        /// Data passed to the predicate
        predicate_data: Bytes,
    },
    /// Read and update a contract
    Contract {
        /// Contract UTXO being consumed
        utxo_id: UtxoId,
        /// Root of the contract balances
        balance_root: Bytes32,
        /// Root of the contract state
        state_root: Bytes32,
        /// Contract identifier
        contract_id: ContractId,
    },
}

impl Input {
    /// Witness index used by this input, if any
    pub fn witness_index(&self) -> Option<u8> {
        match self {
            Input::Coin { witness_index, .. } => Some(*witness_index),
            Input::Contract { .. } => None,
        }
    }

    /// UTXO consumed by this input
    pub fn utxo_id(&self) -> &UtxoId {
        match self {
            Input::Coin { utxo_id, .. } | Input::Contract { utxo_id, .. } => utxo_id,
        }
    }
}

impl Encode for Input {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        match self {
            Input::Coin {
                utxo_id,
                owner,
                amount,
                color,
                witness_index,
                maturity,
                predicate,
                predicate_data,
            } => {
                put_word(buf, INPUT_COIN);
                utxo_id.encode_to(buf);
                owner.encode_to(buf);
                put_word(buf, *amount);
                color.encode_to(buf);
                put_word(buf, *witness_index as Word);
                put_word(buf, *maturity);
                put_bytes(buf, predicate);
                put_bytes(buf, predicate_data);
            }
            Input::Contract {
                utxo_id,
                balance_root,
                state_root,
                contract_id,
            } => {
                put_word(buf, INPUT_CONTRACT);
                utxo_id.encode_to(buf);
                balance_root.encode_to(buf);
                state_root.encode_to(buf);
                contract_id.encode_to(buf);
            }
        }
    }
}

impl Decode for Input {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        match reader.word()? {
            INPUT_COIN => Ok(Input::Coin {
                utxo_id: UtxoId::decode_from(reader)?,
                owner: Address::decode_from(reader)?,
                amount: reader.word()?,
                color: Color::decode_from(reader)?,
                witness_index: reader.word_u8("witness_index")?,
                maturity: reader.word()?,
                predicate: reader.bytes()?,
                predicate_data: reader.bytes()?,
            }),
            INPUT_CONTRACT => Ok(Input::Contract {
                utxo_id: UtxoId::decode_from(reader)?,
                balance_root: Bytes32::decode_from(reader)?,
                state_root: Bytes32::decode_from(reader)?,
                contract_id: ContractId::decode_from(reader)?,
            }),
            value => Err(DecodeError::UnknownDiscriminant {
                kind: "input",
                value,
            }),
        }
    }
}

/// Transaction output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    /// New coin
    Coin {
        /// Recipient
        to: Address,
        /// Amount
        amount: Word,
        /// Asset color
        color: Color,
    },
    /// Updated contract state
    Contract {
        /// Index of the matching contract input
        input_index: u8,
        /// Root of the contract balances
        balance_root: Bytes32,
        /// Root of the contract state
        state_root: Bytes32,
    },
    /// Coin leaving the chain
    Withdrawal {
        /// Recipient
        to: Address,
        /// Amount
        amount: Word,
        /// Asset color
        color: Color,
    },
    /// Unspent remainder of a color
    Change {
        /// Recipient
        to: Address,
        /// Amount (set by the node)
        amount: Word,
        /// Asset color
        color: Color,
    },
    /// Coin whose recipient and amount are set during execution
    Variable {
        /// Recipient
        to: Address,
        /// Amount
        amount: Word,
        /// Asset color
        color: Color,
    },
    /// Contract deployed by a create transaction
    ContractCreated {
        /// Identifier of the new contract
        contract_id: ContractId,
    },
}

impl Output {
    /// Shorthand for a coin output
    pub fn coin(to: Address, amount: Word, color: Color) -> Self {
        Output::Coin { to, amount, color }
    }

    /// Shorthand for a change output
    pub fn change(to: Address, color: Color) -> Self {
        Output::Change {
            to,
            amount: 0,
            color,
        }
    }
}

impl Encode for Output {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        let coin_like = |buf: &mut Vec<u8>, tag: Word, to: &Address, amount: Word, color: &Color| {
            put_word(buf, tag);
            to.encode_to(buf);
            put_word(buf, amount);
            color.encode_to(buf);
        };
        match self {
            Output::Coin { to, amount, color } => coin_like(buf, OUTPUT_COIN, to, *amount, color),
            Output::Contract {
                input_index,
                balance_root,
                state_root,
            } => {
                put_word(buf, OUTPUT_CONTRACT);
                put_word(buf, *input_index as Word);
                balance_root.encode_to(buf);
                state_root.encode_to(buf);
            }
            Output::Withdrawal { to, amount, color } => {
                coin_like(buf, OUTPUT_WITHDRAWAL, to, *amount, color)
            }
            Output::Change { to, amount, color } => {
                coin_like(buf, OUTPUT_CHANGE, to, *amount, color)
            }
            Output::Variable { to, amount, color } => {
                coin_like(buf, OUTPUT_VARIABLE, to, *amount, color)
            }
            Output::ContractCreated { contract_id } => {
                put_word(buf, OUTPUT_CONTRACT_CREATED);
                contract_id.encode_to(buf);
            }
        }
    }
}

impl Decode for Output {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let tag = reader.word()?;
        match tag {
            OUTPUT_CONTRACT => Ok(Output::Contract {
                input_index: reader.word_u8("input_index")?,
                balance_root: Bytes32::decode_from(reader)?,
                state_root: Bytes32::decode_from(reader)?,
            }),
            OUTPUT_CONTRACT_CREATED => Ok(Output::ContractCreated {
                contract_id: ContractId::decode_from(reader)?,
            }),
            OUTPUT_COIN | OUTPUT_WITHDRAWAL | OUTPUT_CHANGE | OUTPUT_VARIABLE => {
                let to = Address::decode_from(reader)?;
                let amount = reader.word()?;
                let color = Color::decode_from(reader)?;
                Ok(match tag {
                    OUTPUT_COIN => Output::Coin { to, amount, color },
                    OUTPUT_WITHDRAWAL => Output::Withdrawal { to, amount, color },
                    OUTPUT_CHANGE => Output::Change { to, amount, color },
                    _ => Output::Variable { to, amount, color },
                })
            }
            value => Err(DecodeError::UnknownDiscriminant {
                kind: "output",
                value,
            }),
        }
    }
}

/// Opaque witness data (signatures, contract bytecode)
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Witness {
    /// Raw witness bytes
    pub data: Bytes,
}

impl Witness {
    /// Wrap raw bytes as a witness
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl From<Vec<u8>> for Witness {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl Encode for Witness {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        put_bytes(buf, &self.data);
    }
}

impl Decode for Witness {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            data: reader.bytes()?,
        })
    }
}

/// Canonical ledger transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    /// Run a script against the ledger
    Script {
        /// Price per unit of gas
        gas_price: Word,
        /// Maximum gas the script may use
        gas_limit: Word,
        /// Block height before which the transaction is invalid
        maturity: Word,
        /// Merkle root of the receipts (set by the node)
        receipts_root: Bytes32,
        /// Script bytecode
        script: Bytes,
        /// Data passed to the script
        script_data: Bytes,
        /// Inputs
        inputs: Vec<Input>,
        /// Outputs
        outputs: Vec<Output>,
        /// Witnesses
        witnesses: Vec<Witness>,
    },
    /// Deploy a contract
    Create {
        /// Price per unit of gas
        gas_price: Word,
        /// Maximum gas
        gas_limit: Word,
        /// Block height before which the transaction is invalid
        maturity: Word,
        /// Index of the witness holding the contract bytecode
        bytecode_witness_index: u8,
        /// Salt for the contract id
        salt: Salt,
        /// Contracts the new contract may call
        static_contracts: Vec<ContractId>,
        /// Inputs
        inputs: Vec<Input>,
        /// Outputs
        outputs: Vec<Output>,
        /// Witnesses
        witnesses: Vec<Witness>,
    },
}

impl Transaction {
    /// Gas price
    pub fn gas_price(&self) -> Word {
        match self {
            Transaction::Script { gas_price, .. } | Transaction::Create { gas_price, .. } => {
                *gas_price
            }
        }
    }

    /// Gas limit
    pub fn gas_limit(&self) -> Word {
        match self {
            Transaction::Script { gas_limit, .. } | Transaction::Create { gas_limit, .. } => {
                *gas_limit
            }
        }
    }

    /// Maturity height
    pub fn maturity(&self) -> Word {
        match self {
            Transaction::Script { maturity, .. } | Transaction::Create { maturity, .. } => {
                *maturity
            }
        }
    }

    /// Inputs
    pub fn inputs(&self) -> &[Input] {
        match self {
            Transaction::Script { inputs, .. } | Transaction::Create { inputs, .. } => inputs,
        }
    }

    /// Outputs
    pub fn outputs(&self) -> &[Output] {
        match self {
            Transaction::Script { outputs, .. } | Transaction::Create { outputs, .. } => outputs,
        }
    }

    /// Witnesses
    pub fn witnesses(&self) -> &[Witness] {
        match self {
            Transaction::Script { witnesses, .. } | Transaction::Create { witnesses, .. } => {
                witnesses
            }
        }
    }

    /// Check if this is a script transaction
    pub fn is_script(&self) -> bool {
        matches!(self, Transaction::Script { .. })
    }

    /// Check if this is a contract deployment
    pub fn is_create(&self) -> bool {
        matches!(self, Transaction::Create { .. })
    }

    /// Locally computed transaction id.
    ///
    /// SHA-256 of the encoding with witnesses removed and the receipts root
    /// zeroed, so signing and execution do not change it.
    pub fn id(&self) -> Bytes32 {
        let mut stripped = self.clone();
        match &mut stripped {
            Transaction::Script {
                receipts_root,
                witnesses,
                ..
            } => {
                *receipts_root = Bytes32::ZERO;
                witnesses.clear();
            }
            Transaction::Create { witnesses, .. } => witnesses.clear(),
        }
        let digest = Sha256::digest(stripped.encode());
        Bytes32::from_bytes(digest.into())
    }
}

impl Encode for Transaction {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        match self {
            Transaction::Script {
                gas_price,
                gas_limit,
                maturity,
                receipts_root,
                script,
                script_data,
                inputs,
                outputs,
                witnesses,
            } => {
                put_word(buf, TX_SCRIPT);
                put_word(buf, *gas_price);
                put_word(buf, *gas_limit);
                put_word(buf, *maturity);
                receipts_root.encode_to(buf);
                put_bytes(buf, script);
                put_bytes(buf, script_data);
                put_list(buf, inputs);
                put_list(buf, outputs);
                put_list(buf, witnesses);
            }
            Transaction::Create {
                gas_price,
                gas_limit,
                maturity,
                bytecode_witness_index,
                salt,
                static_contracts,
                inputs,
                outputs,
                witnesses,
            } => {
                put_word(buf, TX_CREATE);
                put_word(buf, *gas_price);
                put_word(buf, *gas_limit);
                put_word(buf, *maturity);
                put_word(buf, *bytecode_witness_index as Word);
                salt.encode_to(buf);
                put_list(buf, static_contracts);
                put_list(buf, inputs);
                put_list(buf, outputs);
                put_list(buf, witnesses);
            }
        }
    }
}

impl Decode for Transaction {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        match reader.word()? {
            TX_SCRIPT => Ok(Transaction::Script {
                gas_price: reader.word()?,
                gas_limit: reader.word()?,
                maturity: reader.word()?,
                receipts_root: Bytes32::decode_from(reader)?,
                script: reader.bytes()?,
                script_data: reader.bytes()?,
                inputs: reader.list()?,
                outputs: reader.list()?,
                witnesses: reader.list()?,
            }),
            TX_CREATE => Ok(Transaction::Create {
                gas_price: reader.word()?,
                gas_limit: reader.word()?,
                maturity: reader.word()?,
                bytecode_witness_index: reader.word_u8("bytecode_witness_index")?,
                salt: Salt::decode_from(reader)?,
                static_contracts: reader.list()?,
                inputs: reader.list()?,
                outputs: reader.list()?,
                witnesses: reader.list()?,
            }),
            value => Err(DecodeError::UnknownDiscriminant {
                kind: "transaction",
                value,
            }),
        }
    }
}
