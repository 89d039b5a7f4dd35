//! Codec property tests for lumen-types
//!
//! Transactions and receipts must survive encode/decode unchanged, and every
//! payload must be self-delimiting.

use bytes::Bytes;
use lumen_types::{
    Address, Bytes32, Color, ContractId, Decode, DecodeError, Encode, Input, Output, Receipt,
    Transaction, UtxoId, Witness,
};
use proptest::prelude::*;

fn arb_bytes32() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

fn arb_blob() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

fn arb_utxo() -> impl Strategy<Value = UtxoId> {
    (arb_bytes32(), any::<u8>()).prop_map(|(id, idx)| UtxoId::new(Bytes32::from_bytes(id), idx))
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (
            arb_utxo(),
            arb_bytes32(),
            any::<u64>(),
            arb_bytes32(),
            any::<u8>(),
            any::<u64>(),
            arb_blob(),
            arb_blob(),
        )
            .prop_map(
                |(utxo_id, owner, amount, color, witness_index, maturity, predicate, data)| {
                    Input::Coin {
                        utxo_id,
                        owner: Address::from_bytes(owner),
                        amount,
                        color: Color::from_bytes(color),
                        witness_index,
                        maturity,
                        predicate,
                        predicate_data: data,
                    }
                }
            ),
        (arb_utxo(), arb_bytes32(), arb_bytes32(), arb_bytes32()).prop_map(
            |(utxo_id, balance_root, state_root, contract_id)| Input::Contract {
                utxo_id,
                balance_root: Bytes32::from_bytes(balance_root),
                state_root: Bytes32::from_bytes(state_root),
                contract_id: ContractId::from_bytes(contract_id),
            }
        ),
    ]
}

fn arb_coin_fields() -> impl Strategy<Value = (Address, u64, Color)> {
    (arb_bytes32(), any::<u64>(), arb_bytes32())
        .prop_map(|(to, amount, color)| (Address::from_bytes(to), amount, Color::from_bytes(color)))
}

fn arb_output() -> impl Strategy<Value = Output> {
    prop_oneof![
        arb_coin_fields().prop_map(|(to, amount, color)| Output::Coin { to, amount, color }),
        arb_coin_fields().prop_map(|(to, amount, color)| Output::Withdrawal { to, amount, color }),
        arb_coin_fields().prop_map(|(to, amount, color)| Output::Change { to, amount, color }),
        arb_coin_fields().prop_map(|(to, amount, color)| Output::Variable { to, amount, color }),
        (any::<u8>(), arb_bytes32(), arb_bytes32()).prop_map(|(input_index, b, s)| {
            Output::Contract {
                input_index,
                balance_root: Bytes32::from_bytes(b),
                state_root: Bytes32::from_bytes(s),
            }
        }),
        arb_bytes32().prop_map(|id| Output::ContractCreated {
            contract_id: ContractId::from_bytes(id)
        }),
    ]
}

/// Fields shared by both transaction kinds
#[allow(clippy::type_complexity)]
fn arb_tx_common(
) -> impl Strategy<Value = (u64, u64, u64, Vec<Input>, Vec<Output>, Vec<Witness>)> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        prop::collection::vec(arb_input(), 0..4),
        prop::collection::vec(arb_output(), 0..4),
        prop::collection::vec(arb_blob().prop_map(Witness::new), 0..3),
    )
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    prop_oneof![
        (arb_tx_common(), arb_bytes32(), arb_blob(), arb_blob()).prop_map(
            |((gas_price, gas_limit, maturity, inputs, outputs, witnesses), root, script, data)| {
                Transaction::Script {
                    gas_price,
                    gas_limit,
                    maturity,
                    receipts_root: Bytes32::from_bytes(root),
                    script,
                    script_data: data,
                    inputs,
                    outputs,
                    witnesses,
                }
            }
        ),
        (
            arb_tx_common(),
            any::<u8>(),
            arb_bytes32(),
            prop::collection::vec(arb_bytes32(), 0..3)
        )
            .prop_map(
                |((gas_price, gas_limit, maturity, inputs, outputs, witnesses), idx, salt, statics)| {
                    Transaction::Create {
                        gas_price,
                        gas_limit,
                        maturity,
                        bytecode_witness_index: idx,
                        salt: Bytes32::from_bytes(salt),
                        static_contracts: statics.into_iter().map(ContractId::from_bytes).collect(),
                        inputs,
                        outputs,
                        witnesses,
                    }
                }
            ),
    ]
}

fn arb_receipt() -> impl Strategy<Value = Receipt> {
    prop_oneof![
        (arb_bytes32(), any::<u64>(), any::<u64>(), any::<u64>()).prop_map(|(id, val, pc, is)| {
            Receipt::Return {
                id: ContractId::from_bytes(id),
                val,
                pc,
                is,
            }
        }),
        (arb_bytes32(), arb_bytes32(), arb_blob(), any::<u64>()).prop_map(
            |(id, digest, data, ptr)| Receipt::ReturnData {
                id: ContractId::from_bytes(id),
                ptr,
                len: data.len() as u64,
                digest: Bytes32::from_bytes(digest),
                data,
                pc: 0,
                is: 0,
            }
        ),
        (arb_bytes32(), arb_bytes32(), any::<u64>(), arb_bytes32()).prop_map(
            |(id, to, amount, color)| Receipt::TransferOut {
                id: ContractId::from_bytes(id),
                to: Address::from_bytes(to),
                amount,
                color: Color::from_bytes(color),
                pc: 4,
                is: 0,
            }
        ),
        (any::<u64>(), any::<u64>())
            .prop_map(|(result, gas_used)| Receipt::ScriptResult { result, gas_used }),
    ]
}

proptest! {
    #[test]
    fn transaction_roundtrip(tx in arb_transaction()) {
        let encoded = tx.encode();
        let (decoded, consumed) = Transaction::decode(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, tx);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn transaction_ignores_trailing_bytes(tx in arb_transaction(), tail in prop::collection::vec(any::<u8>(), 0..16)) {
        let mut encoded = tx.encode();
        let len = encoded.len();
        encoded.extend(tail);
        let (decoded, consumed) = Transaction::decode(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, tx);
        prop_assert_eq!(consumed, len);
    }

    #[test]
    fn receipt_roundtrip(receipt in arb_receipt()) {
        let encoded = receipt.encode();
        let (decoded, consumed) = Receipt::decode(&encoded, 0).unwrap();
        prop_assert_eq!(decoded, receipt);
        prop_assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn truncated_transaction_never_decodes(tx in arb_transaction(), cut in 1usize..64) {
        let encoded = tx.encode();
        let keep = encoded.len().saturating_sub(cut);
        prop_assert!(Transaction::decode(&encoded[..keep], 0).is_err());
    }
}

#[test]
fn test_empty_payload_is_eof() {
    assert_eq!(
        Transaction::decode(&[], 0).unwrap_err(),
        DecodeError::UnexpectedEof {
            needed: 8,
            available: 0
        }
    );
}

#[test]
fn test_back_to_back_receipts_decode_by_offset() {
    let first = Receipt::ScriptResult {
        result: 0,
        gas_used: 7,
    };
    let second = Receipt::Revert {
        id: ContractId::ZERO,
        ra: 1,
        pc: 2,
        is: 3,
    };
    let mut buf = first.encode();
    buf.extend(second.encode());

    let (a, used) = Receipt::decode(&buf, 0).unwrap();
    let (b, _) = Receipt::decode(&buf, used).unwrap();
    assert_eq!(a, first);
    assert_eq!(b, second);
}
