//! Bridge between hex payloads on the wire and decoded ledger types

use lumen_types::{Decode, Encode, Receipt, Transaction};

use crate::SdkError;

/// Hex-encode bytes with a `0x` prefix
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex text (prefix optional). Malformed input is an error.
pub fn from_hex(s: &str) -> Result<Vec<u8>, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// Encode a transaction for a mutation variable
pub fn encode_transaction(tx: &Transaction) -> String {
    to_hex(&tx.encode())
}

/// Decode the first transaction in a hex payload
pub fn decode_transaction(raw: &str) -> Result<Transaction, SdkError> {
    let bytes = from_hex(raw)?;
    let (tx, _) = Transaction::decode(&bytes, 0)?;
    Ok(tx)
}

/// Decode the first receipt in a hex payload
pub fn decode_receipt(raw: &str) -> Result<Receipt, SdkError> {
    let bytes = from_hex(raw)?;
    let (receipt, _) = Receipt::decode(&bytes, 0)?;
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use lumen_types::{Bytes32, ContractId};

    fn sample_tx() -> Transaction {
        Transaction::Script {
            gas_price: 0,
            gas_limit: 1_000_000,
            maturity: 0,
            receipts_root: Bytes32::ZERO,
            script: Bytes::from_static(&[0x24, 0x04, 0x00, 0x00]),
            script_data: Bytes::new(),
            inputs: vec![],
            outputs: vec![],
            witnesses: vec![],
        }
    }

    #[test]
    fn test_to_hex_prefixed() {
        assert_eq!(to_hex(&[0x12, 0x34]), "0x1234");
        assert_eq!(to_hex(&[]), "0x");
    }

    #[test]
    fn test_from_hex_with_and_without_prefix() {
        assert_eq!(from_hex("0x1234").unwrap(), vec![0x12, 0x34]);
        assert_eq!(from_hex("1234").unwrap(), vec![0x12, 0x34]);
        assert!(from_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        assert!(matches!(from_hex("0x123"), Err(SdkError::InvalidHex(_))));
    }

    #[test]
    fn test_from_hex_rejects_bad_digit() {
        assert!(matches!(from_hex("0xzz"), Err(SdkError::InvalidHex(_))));
    }

    #[test]
    fn test_transaction_through_hex() {
        let tx = sample_tx();
        let decoded = decode_transaction(&encode_transaction(&tx)).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_decode_transaction_keeps_first_value() {
        let tx = sample_tx();
        let mut bytes = tx.encode();
        bytes.extend(sample_tx().encode());
        assert_eq!(decode_transaction(&to_hex(&bytes)).unwrap(), tx);
    }

    #[test]
    fn test_decode_malformed_transaction() {
        let result = decode_transaction("0x0000000000000000");
        assert!(matches!(result, Err(SdkError::Decode(_))));
    }

    #[test]
    fn test_decode_receipt() {
        let receipt = Receipt::Return {
            id: ContractId::ZERO,
            val: 1,
            pc: 0,
            is: 0,
        };
        let decoded = decode_receipt(&to_hex(&receipt.encode())).unwrap();
        assert_eq!(decoded, receipt);
    }
}
