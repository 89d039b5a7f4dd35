//! Execution receipts reported by the node

use bytes::Bytes;

use crate::codec::{put_bytes, put_word, Decode, DecodeError, Encode, Reader};
use crate::primitives::{Address, Bytes32, Color, ContractId};
use crate::Word;

const RECEIPT_CALL: Word = 0;
const RECEIPT_RETURN: Word = 1;
const RECEIPT_RETURN_DATA: Word = 2;
const RECEIPT_PANIC: Word = 3;
const RECEIPT_REVERT: Word = 4;
const RECEIPT_LOG: Word = 5;
const RECEIPT_LOG_DATA: Word = 6;
const RECEIPT_TRANSFER: Word = 7;
const RECEIPT_TRANSFER_OUT: Word = 8;
const RECEIPT_SCRIPT_RESULT: Word = 9;

/// One unit of execution outcome.
///
/// `pc` and `is` are the program counter and instruction start of the
/// context that emitted the receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Receipt {
    /// Contract call
    Call {
        /// Caller context
        id: ContractId,
        /// Called contract
        to: ContractId,
        /// Amount forwarded
        amount: Word,
        /// Color of the forwarded amount
        color: Color,
        /// Gas forwarded
        gas: Word,
        /// First call parameter
        param1: Word,
        /// Second call parameter
        param2: Word,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Return with a single word
    Return {
        /// Returning context
        id: ContractId,
        /// Returned value
        val: Word,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Return with a memory range
    ReturnData {
        /// Returning context
        id: ContractId,
        /// Start of the returned range
        ptr: Word,
        /// Length of the returned range
        len: Word,
        /// SHA-256 of the returned bytes
        digest: Bytes32,
        /// Returned bytes
        data: Bytes,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// VM panic
    Panic {
        /// Panicking context
        id: ContractId,
        /// Panic reason code
        reason: Word,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Explicit revert
    Revert {
        /// Reverting context
        id: ContractId,
        /// Revert code
        ra: Word,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Log of four registers
    Log {
        /// Logging context
        id: ContractId,
        /// Register A
        ra: Word,
        /// Register B
        rb: Word,
        /// Register C
        rc: Word,
        /// Register D
        rd: Word,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Log of a memory range
    LogData {
        /// Logging context
        id: ContractId,
        /// Register A
        ra: Word,
        /// Register B
        rb: Word,
        /// Start of the logged range
        ptr: Word,
        /// Length of the logged range
        len: Word,
        /// SHA-256 of the logged bytes
        digest: Bytes32,
        /// Logged bytes
        data: Bytes,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Transfer to a contract
    Transfer {
        /// Sending context
        id: ContractId,
        /// Receiving contract
        to: ContractId,
        /// Amount
        amount: Word,
        /// Color
        color: Color,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Transfer to an address
    TransferOut {
        /// Sending context
        id: ContractId,
        /// Receiving address
        to: Address,
        /// Amount
        amount: Word,
        /// Color
        color: Color,
        /// Program counter
        pc: Word,
        /// Instruction start
        is: Word,
    },
    /// Final outcome of a script
    ScriptResult {
        /// Result code (0 on success)
        result: Word,
        /// Gas consumed
        gas_used: Word,
    },
}

impl Receipt {
    /// Context that emitted the receipt (`None` for script results)
    pub fn id(&self) -> Option<&ContractId> {
        match self {
            Receipt::Call { id, .. }
            | Receipt::Return { id, .. }
            | Receipt::ReturnData { id, .. }
            | Receipt::Panic { id, .. }
            | Receipt::Revert { id, .. }
            | Receipt::Log { id, .. }
            | Receipt::LogData { id, .. }
            | Receipt::Transfer { id, .. }
            | Receipt::TransferOut { id, .. } => Some(id),
            Receipt::ScriptResult { .. } => None,
        }
    }

    /// Check if the receipt reports a failure
    pub fn is_failure(&self) -> bool {
        match self {
            Receipt::Panic { .. } | Receipt::Revert { .. } => true,
            Receipt::ScriptResult { result, .. } => *result != 0,
            _ => false,
        }
    }

    /// Receipt kind as reported by the node
    pub fn kind(&self) -> &'static str {
        match self {
            Receipt::Call { .. } => "Call",
            Receipt::Return { .. } => "Return",
            Receipt::ReturnData { .. } => "ReturnData",
            Receipt::Panic { .. } => "Panic",
            Receipt::Revert { .. } => "Revert",
            Receipt::Log { .. } => "Log",
            Receipt::LogData { .. } => "LogData",
            Receipt::Transfer { .. } => "Transfer",
            Receipt::TransferOut { .. } => "TransferOut",
            Receipt::ScriptResult { .. } => "ScriptResult",
        }
    }
}

impl Encode for Receipt {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        match self {
            Receipt::Call {
                id,
                to,
                amount,
                color,
                gas,
                param1,
                param2,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_CALL);
                id.encode_to(buf);
                to.encode_to(buf);
                put_word(buf, *amount);
                color.encode_to(buf);
                for word in [gas, param1, param2, pc, is] {
                    put_word(buf, *word);
                }
            }
            Receipt::Return { id, val, pc, is } => {
                put_word(buf, RECEIPT_RETURN);
                id.encode_to(buf);
                for word in [val, pc, is] {
                    put_word(buf, *word);
                }
            }
            Receipt::ReturnData {
                id,
                ptr,
                len,
                digest,
                data,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_RETURN_DATA);
                id.encode_to(buf);
                put_word(buf, *ptr);
                put_word(buf, *len);
                digest.encode_to(buf);
                put_bytes(buf, data);
                put_word(buf, *pc);
                put_word(buf, *is);
            }
            Receipt::Panic { id, reason, pc, is } => {
                put_word(buf, RECEIPT_PANIC);
                id.encode_to(buf);
                for word in [reason, pc, is] {
                    put_word(buf, *word);
                }
            }
            Receipt::Revert { id, ra, pc, is } => {
                put_word(buf, RECEIPT_REVERT);
                id.encode_to(buf);
                for word in [ra, pc, is] {
                    put_word(buf, *word);
                }
            }
            Receipt::Log {
                id,
                ra,
                rb,
                rc,
                rd,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_LOG);
                id.encode_to(buf);
                for word in [ra, rb, rc, rd, pc, is] {
                    put_word(buf, *word);
                }
            }
            Receipt::LogData {
                id,
                ra,
                rb,
                ptr,
                len,
                digest,
                data,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_LOG_DATA);
                id.encode_to(buf);
                for word in [ra, rb, ptr, len] {
                    put_word(buf, *word);
                }
                digest.encode_to(buf);
                put_bytes(buf, data);
                put_word(buf, *pc);
                put_word(buf, *is);
            }
            Receipt::Transfer {
                id,
                to,
                amount,
                color,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_TRANSFER);
                id.encode_to(buf);
                to.encode_to(buf);
                put_word(buf, *amount);
                color.encode_to(buf);
                put_word(buf, *pc);
                put_word(buf, *is);
            }
            Receipt::TransferOut {
                id,
                to,
                amount,
                color,
                pc,
                is,
            } => {
                put_word(buf, RECEIPT_TRANSFER_OUT);
                id.encode_to(buf);
                to.encode_to(buf);
                put_word(buf, *amount);
                color.encode_to(buf);
                put_word(buf, *pc);
                put_word(buf, *is);
            }
            Receipt::ScriptResult { result, gas_used } => {
                put_word(buf, RECEIPT_SCRIPT_RESULT);
                put_word(buf, *result);
                put_word(buf, *gas_used);
            }
        }
    }
}

impl Decode for Receipt {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let receipt = match reader.word()? {
            RECEIPT_CALL => Receipt::Call {
                id: ContractId::decode_from(reader)?,
                to: ContractId::decode_from(reader)?,
                amount: reader.word()?,
                color: Color::decode_from(reader)?,
                gas: reader.word()?,
                param1: reader.word()?,
                param2: reader.word()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_RETURN => Receipt::Return {
                id: ContractId::decode_from(reader)?,
                val: reader.word()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_RETURN_DATA => Receipt::ReturnData {
                id: ContractId::decode_from(reader)?,
                ptr: reader.word()?,
                len: reader.word()?,
                digest: Bytes32::decode_from(reader)?,
                data: reader.bytes()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_PANIC => Receipt::Panic {
                id: ContractId::decode_from(reader)?,
                reason: reader.word()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_REVERT => Receipt::Revert {
                id: ContractId::decode_from(reader)?,
                ra: reader.word()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_LOG => Receipt::Log {
                id: ContractId::decode_from(reader)?,
                ra: reader.word()?,
                rb: reader.word()?,
                rc: reader.word()?,
                rd: reader.word()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_LOG_DATA => Receipt::LogData {
                id: ContractId::decode_from(reader)?,
                ra: reader.word()?,
                rb: reader.word()?,
                ptr: reader.word()?,
                len: reader.word()?,
                digest: Bytes32::decode_from(reader)?,
                data: reader.bytes()?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_TRANSFER => Receipt::Transfer {
                id: ContractId::decode_from(reader)?,
                to: ContractId::decode_from(reader)?,
                amount: reader.word()?,
                color: Color::decode_from(reader)?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_TRANSFER_OUT => Receipt::TransferOut {
                id: ContractId::decode_from(reader)?,
                to: Address::decode_from(reader)?,
                amount: reader.word()?,
                color: Color::decode_from(reader)?,
                pc: reader.word()?,
                is: reader.word()?,
            },
            RECEIPT_SCRIPT_RESULT => Receipt::ScriptResult {
                result: reader.word()?,
                gas_used: reader.word()?,
            },
            value => {
                return Err(DecodeError::UnknownDiscriminant {
                    kind: "receipt",
                    value,
                })
            }
        };
        Ok(receipt)
    }
}
