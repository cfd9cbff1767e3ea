// This source is derived from Parity code
//
//! Wire serialization and parsing.

use std::ops::Deref;

use ethereum_types::{Address, H256, U256};
use ethkey::{self, Secret};
use hash::keccak;
use rlp::{DecoderError, Rlp};

use crate::error::Error;
use crate::field::{AddressField, FieldValue, TransactionField};
use crate::signature::SignatureComponents;
use crate::transaction::{eip155_methods, AccessList, TransactionRequest, TxType, TypedTransaction};
use crate::Bytes;

/// Outcome of signer recovery on a parsed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
	/// No signature on the wire.
	Unsigned,
	Recovered(Address),
	/// Signature present but no public key could be recovered from it.
	Unrecoverable(String),
}

impl Sender {
	pub fn address(&self) -> Option<Address> {
		match *self {
			Sender::Recovered(address) => Some(address),
			_ => None,
		}
	}
}

/// Signature items as found on the wire, `r` and `s` zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSignature {
	pub v: u64,
	pub r: H256,
	pub s: H256,
	/// `None` when `v` doesn't reduce to a parity of 0 or 1.
	pub recovery_param: Option<u8>,
}

impl ParsedSignature {
	/// Normalized form, suitable for serializing the transaction again.
	pub fn components(&self) -> Result<SignatureComponents, Error> {
		SignatureComponents::from_rsv(self.r, self.s, self.v)
	}
}

/// A decoded transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	/// Variant given by the envelope.
	pub tx_type: TxType,
	/// Decoded fields. Those the variant carries are all set, the rest are
	/// `None`.
	pub request: TransactionRequest,
	pub signature: Option<ParsedSignature>,
	pub sender: Sender,
	/// Keccak of the raw bytes, signed transactions only.
	pub hash: Option<H256>,
}

impl Transaction {
	pub fn is_signed(&self) -> bool {
		self.signature.is_some()
	}

	/// Envelope byte, 0 for legacy.
	pub fn type_id(&self) -> u8 {
		self.tx_type.id()
	}

	/// Recovered signer.
	pub fn from(&self) -> Option<Address> {
		self.sender.address()
	}

	/// Decoded fields narrowed to the envelope variant.
	pub fn typed(&self) -> Result<TypedTransaction, Error> {
		TypedTransaction::from_request(self.tx_type, &self.request)
	}

	/// Wire form again, keeping the decoded variant.
	pub fn rlp_bytes(&self) -> Result<Bytes, Error> {
		let tx = self.typed()?;
		match self.signature {
			Some(ref signature) => Ok(tx.sealed_rlp(&tx.seal(&signature.components()?)?)),
			None => Ok(tx.unsigned_rlp()),
		}
	}
}

impl Deref for Transaction {
	type Target = TransactionRequest;

	fn deref(&self) -> &Self::Target {
		&self.request
	}
}

/// Serializes `request`, signed when `signature` is given.
///
/// Without an explicit chain id, an EIP-155 `v` in the signature supplies it.
pub fn serialize_transaction(
	request: &TransactionRequest,
	signature: Option<&SignatureComponents>,
) -> Result<Bytes, Error> {
	let mut request = request.clone();
	if let (None, Some(signature)) = (request.chain_id, signature) {
		let chain_id = eip155_methods::chain_id_for_signature(signature.v).ok_or(Error::InvalidChainId)?;
		if chain_id != 0 {
			debug!(target: "transaction", "Derived chain id {} from v = {}", chain_id, signature.v);
		}
		request.chain_id = Some(chain_id);
	}

	let tx = TypedTransaction::classify(&request)?;
	match signature {
		Some(signature) => Ok(tx.sealed_rlp(&tx.seal(signature)?)),
		None => Ok(tx.unsigned_rlp()),
	}
}

/// Serializes loosely typed `(name, value)` pairs. Unknown names are rejected
/// before anything is encoded.
pub fn serialize_fields<I, K>(fields: I, signature: Option<&SignatureComponents>) -> Result<Bytes, Error>
where
	I: IntoIterator<Item = (K, FieldValue)>,
	K: AsRef<str>,
{
	serialize_transaction(&TransactionRequest::from_fields(fields)?, signature)
}

/// Digest a signer has to sign for `request`.
pub fn signing_hash(request: &TransactionRequest) -> Result<H256, Error> {
	Ok(TypedTransaction::classify(request)?.signing_hash())
}

/// Signs `request` with `secret` and returns the signed wire bytes.
pub fn sign_transaction(request: &TransactionRequest, secret: &Secret) -> Result<Bytes, Error> {
	let tx = TypedTransaction::classify(request)?;
	let signature = ethkey::sign(secret, &tx.signing_hash())?;
	let sealed = tx.seal(&signature.into())?;
	Ok(tx.sealed_rlp(&sealed))
}

fn sniff(raw: &[u8]) -> Result<TxType, Error> {
	let first = *raw.first().ok_or(Error::InvalidRawTransaction(DecoderError::RlpIsTooShort))?;
	if first >= 0xc0 {
		return Ok(TxType::Legacy);
	}
	TxType::from_prefix(first).ok_or(Error::UnsupportedTxType(first))
}

fn item_bytes<'a>(item: &Rlp<'a>) -> Result<&'a [u8], DecoderError> {
	if !item.is_data() {
		return Err(DecoderError::RlpExpectedToBeData);
	}
	item.data()
}

fn decode_u64(item: &Rlp) -> Result<u64, DecoderError> {
	let bytes = item_bytes(item)?;
	if bytes.len() > 8 {
		return Err(DecoderError::RlpIsTooBig);
	}
	Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn decode_padded(item: &Rlp) -> Result<H256, DecoderError> {
	let bytes = item_bytes(item)?;
	if bytes.len() > 32 {
		return Err(DecoderError::RlpIsTooBig);
	}
	let mut padded = H256::zero();
	padded[32 - bytes.len()..].copy_from_slice(bytes);
	Ok(padded)
}

fn decode_field(request: &mut TransactionRequest, field: TransactionField, item: &Rlp) -> Result<(), DecoderError> {
	if field == TransactionField::AccessList {
		request.access_list = Some(item.as_val::<AccessList>()?);
		return Ok(());
	}

	let bytes = item_bytes(item)?;
	match field {
		TransactionField::ChainId => request.chain_id = Some(decode_u64(item)?),
		TransactionField::To => request.to = AddressField::from_bytes(bytes),
		TransactionField::FeeCurrency => request.fee_currency = AddressField::from_bytes(bytes),
		TransactionField::Data => request.data = Some(bytes.to_vec()),
		numeric => {
			if bytes.len() > 32 {
				return Err(DecoderError::RlpIsTooBig);
			}
			let value = Some(U256::from_big_endian(bytes));
			match numeric {
				TransactionField::Nonce => request.nonce = value,
				TransactionField::GasPrice => request.gas_price = value,
				TransactionField::GasLimit => request.gas_limit = value,
				TransactionField::Value => request.value = value,
				TransactionField::MaxFeePerGas => request.max_fee_per_gas = value,
				TransactionField::MaxPriorityFeePerGas => request.max_priority_fee_per_gas = value,
				TransactionField::MaxFeeInFeeCurrency => request.max_fee_in_fee_currency = value,
				_ => return Err(DecoderError::Custom("unexpected transaction field")),
			}
		}
	}
	Ok(())
}

fn decode_signature(list: &Rlp, offset: usize) -> Result<(u64, H256, H256), DecoderError> {
	Ok((decode_u64(&list.at(offset)?)?, decode_padded(&list.at(offset + 1)?)?, decode_padded(&list.at(offset + 2)?)?))
}

fn recover_sender(tx_type: TxType, request: &TransactionRequest, signature: &ParsedSignature) -> Sender {
	let recovered = signature
		.recovery_param
		.ok_or_else(|| format!("invalid v = {}", signature.v))
		.and_then(|recovery_param| {
			let digest = TypedTransaction::from_request(tx_type, request).map_err(|e| e.to_string())?.signing_hash();
			let sig = ethkey::Signature::from_rsv(&signature.r, &signature.s, recovery_param);
			ethkey::recover_address(&sig, &digest).map_err(|e| e.to_string())
		});

	match recovered {
		Ok(address) => Sender::Recovered(address),
		Err(reason) => {
			warn!(target: "transaction", "Unable to recover {} transaction signer: {}", tx_type, reason);
			Sender::Unrecoverable(reason)
		}
	}
}

/// Decodes wire bytes of any variant.
///
/// Signed transactions get their signer recovered and their hash computed.
/// A signature that doesn't recover is not an error, it shows up as
/// [`Sender::Unrecoverable`].
pub fn parse_transaction(raw: &[u8]) -> Result<Transaction, Error> {
	let tx_type = sniff(raw)?;
	trace!(target: "transaction", "Parsing {} transaction, {} bytes", tx_type, raw.len());
	let payload = if tx_type == TxType::Legacy { raw } else { &raw[1..] };

	let list = Rlp::new(payload);
	let info = list.payload_info()?;
	if info.header_len + info.value_len != payload.len() {
		return Err(DecoderError::RlpInconsistentLengthAndData.into());
	}
	if !list.is_list() {
		return Err(DecoderError::RlpExpectedToBeList.into());
	}

	let count = list.item_count()?;
	let fields = tx_type.fields();
	let valid_count = match tx_type {
		TxType::Legacy => count == fields.len() || count == tx_type.signed_item_count(),
		_ => count == tx_type.unsigned_item_count() || count == tx_type.signed_item_count(),
	};
	if !valid_count {
		return Err(Error::InvalidItemCount { tx_type, found: count });
	}

	let mut request = TransactionRequest::default();
	for (index, field) in fields.iter().enumerate() {
		decode_field(&mut request, *field, &list.at(index)?)?;
	}

	let mut signature = None;
	if count == tx_type.signed_item_count() {
		let (v, r, s) = decode_signature(&list, fields.len())?;
		let recovery_param = match tx_type {
			TxType::Legacy if r.is_zero() && s.is_zero() => {
				// unsigned EIP-155 payload, `v` holds the chain id
				request.chain_id = Some(v);
				None
			}
			TxType::Legacy => {
				let chain_id = eip155_methods::chain_id_from_v(v);
				request.chain_id = Some(chain_id);
				Some(eip155_methods::recovery_param_from_v(v, chain_id))
			}
			_ if v <= 1 => Some(Some(v as u8)),
			_ => Some(None),
		};
		if let Some(recovery_param) = recovery_param {
			signature = Some(ParsedSignature { v, r, s, recovery_param });
		}
	} else if tx_type == TxType::Legacy {
		request.chain_id = Some(0);
	}

	let (sender, hash) = match signature {
		Some(ref signature) => (recover_sender(tx_type, &request, signature), Some(keccak(raw))),
		None => (Sender::Unsigned, None),
	};

	Ok(Transaction { tx_type, request, signature, sender, hash })
}

#[cfg(test)]
mod tests {
	use super::*;
	use ethkey::{Generator, Random};
	use rustc_hex::FromHex;
	use std::str::FromStr;

	fn bytes(hex: &str) -> Vec<u8> {
		hex.from_hex().unwrap()
	}

	#[test]
	fn legacy_sender() {
		let raw = bytes("f85f800182520894095e7baea6a6c7c4c2dfeb977efac326af552d870a801ba048b55bfa915ac795c431978d8a6a992b628d557da5ff759b307d495a36649353a0efffd310ac743f371de3b9f7f9cb56c0b28ad43601b4ab949f53faa07bd2c804");
		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.tx_type, TxType::Legacy);
		assert_eq!(tx.data, Some(vec![]));
		assert_eq!(tx.gas_limit, Some(U256::from(0x5208u64)));
		assert_eq!(tx.gas_price, Some(U256::from(0x01u64)));
		assert_eq!(tx.nonce, Some(U256::zero()));
		assert_eq!(tx.to_address(), Some(Address::from_str("095e7baea6a6c7c4c2dfeb977efac326af552d87").unwrap()));
		assert_eq!(tx.value, Some(U256::from(0x0au64)));
		assert_eq!(tx.chain_id, Some(0));
		assert_eq!(tx.from(), Some(Address::from_str("0f65fe9276bc9a24ae7083ae28e2660ef72df99e").unwrap()));
		assert_eq!(tx.hash, Some(keccak(&raw)));
		assert_eq!(tx.rlp_bytes().unwrap(), raw);
	}

	#[test]
	fn legacy_should_agree_with_vitalik() {
		let test_vector = |tx_data: &str, address: &'static str| {
			let raw = bytes(tx_data);
			let tx = parse_transaction(&raw).unwrap();
			assert_eq!(tx.from(), Some(Address::from_str(address).unwrap()));
			assert_eq!(tx.chain_id, Some(1));
			assert_eq!(tx.rlp_bytes().unwrap(), raw);
		};

		test_vector("f864808504a817c800825208943535353535353535353535353535353535353535808025a0044852b2a670ade5407e78fb2863c51de9fcb96542a07186fe3aeda6bb8a116da0044852b2a670ade5407e78fb2863c51de9fcb96542a07186fe3aeda6bb8a116d", "f0f6f18bca1b28cd68e4357452947e021241e9ce");
		test_vector("f864018504a817c80182a410943535353535353535353535353535353535353535018025a0489efdaa54c0f20c7adf612882df0950f5a951637e0307cdcb4c672f298b8bcaa0489efdaa54c0f20c7adf612882df0950f5a951637e0307cdcb4c672f298b8bc6", "23ef145a395ea3fa3deb533b8a9e1b4c6c25d112");
		test_vector("f864028504a817c80282f618943535353535353535353535353535353535353535088025a02d7c5bef027816a800da1736444fb58a807ef4c9603b7848673f7e3a68eb14a5a02d7c5bef027816a800da1736444fb58a807ef4c9603b7848673f7e3a68eb14a5", "2e485e0c23b4c3c542628a5f672eeab0ad4888be");
		test_vector("f865038504a817c803830148209435353535353535353535353535353535353535351b8025a02a80e1ef1d7842f27f2e6be0972bb708b9a135c38860dbe73c27c3486c34f4e0a02a80e1ef1d7842f27f2e6be0972bb708b9a135c38860dbe73c27c3486c34f4de", "82a88539669a3fd524d669e858935de5e5410cf0");
		test_vector("f865048504a817c80483019a28943535353535353535353535353535353535353535408025a013600b294191fc92924bb3ce4b969c1e7e2bab8f4c93c3fc6d0a51733df3c063a013600b294191fc92924bb3ce4b969c1e7e2bab8f4c93c3fc6d0a51733df3c060", "f9358f2538fd5ccfeb848b64a96b743fcc930554");
		test_vector("f865058504a817c8058301ec309435353535353535353535353535353535353535357d8025a04eebf77a833b30520287ddd9478ff51abbdffa30aa90a8d655dba0e8a79ce0c1a04eebf77a833b30520287ddd9478ff51abbdffa30aa90a8d655dba0e8a79ce0c1", "a8f7aba377317440bc5b26198a363ad22af1f3a4");
		test_vector("f866068504a817c80683023e3894353535353535353535353535353535353535353581d88025a06455bf8ea6e7463a1046a0b52804526e119b4bf5136279614e0b1e8e296a4e2fa06455bf8ea6e7463a1046a0b52804526e119b4bf5136279614e0b1e8e296a4e2d", "f1f571dc362a0e5b2696b8e775f8491d3e50de35");
		test_vector("f867078504a817c807830290409435353535353535353535353535353535353535358201578025a052f1a9b320cab38e5da8a8f97989383aab0a49165fc91c737310e4f7e9821021a052f1a9b320cab38e5da8a8f97989383aab0a49165fc91c737310e4f7e9821021", "d37922162ab7cea97c97a87551ed02c9a38b7332");
		test_vector("f867088504a817c8088302e2489435353535353535353535353535353535353535358202008025a064b1702d9298fee62dfeccc57d322a463ad55ca201256d01f62b45b2e1c21c12a064b1702d9298fee62dfeccc57d322a463ad55ca201256d01f62b45b2e1c21c10", "9bddad43f934d313c2b79ca28a432dd2b7281029");
		test_vector("f867098504a817c809830334509435353535353535353535353535353535353535358202d98025a052f8f61201b2b11a78d6e866abc9c3db2ae8631fa656bfe5cb53668255367afba052f8f61201b2b11a78d6e866abc9c3db2ae8631fa656bfe5cb53668255367afb", "3c24d7329e92f84f08556ceb6df1cdb0104ca49f");
	}

	#[test]
	fn eip1559_parse_tx() {
		let raw = bytes("02f8710103830f42408518ad0849c4825208941749b8eccc622d81600ab7fa322a17b99def83d2876b803d5ccd438580c001a08303e62f4d7779b09ab9daeaef868a8ad3bc937b435a60e8cc432d224bd8b1fba0520ae4b5906f3978ff413eef4131c1d246b15eb676a19324ce9ad23ac48aa987");
		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.tx_type, TxType::Eip1559);
		assert_eq!(tx.type_id(), 2);
		assert_eq!(tx.chain_id, Some(1));
		assert_eq!(tx.gas_price, None);
		assert_eq!(tx.access_list, Some(AccessList::default()));
		assert_eq!(tx.from(), Some(Address::from_str("fAe06Df909Df46f3b1649c9b11e150F14E9B83B0").unwrap()));
		assert_eq!(
			tx.hash,
			Some(H256::from_str("9903f6398f118dfc04b95ed6c00e55237eb204986590593d13e2f9ce47716ed9").unwrap())
		);
		assert_eq!(tx.signature.unwrap().recovery_param, Some(1));
		assert_eq!(tx.rlp_bytes().unwrap(), raw);
	}

	#[test]
	fn signed_round_trip() {
		let keypair = Random.generate().unwrap();
		let request = TransactionRequest {
			chain_id: Some(44787),
			nonce: Some(9.into()),
			gas_limit: Some(21_000.into()),
			to: Some(Address::repeat_byte(0x42).into()),
			value: Some(1.into()),
			max_fee_per_gas: Some(5_000_000_000u64.into()),
			max_priority_fee_per_gas: Some(1_000_000_000u64.into()),
			fee_currency: Some(Address::repeat_byte(0x76).into()),
			..Default::default()
		};
		let raw = sign_transaction(&request, keypair.secret()).unwrap();
		assert_eq!(raw[0], 0x7b);

		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.from(), Some(keypair.address()));
		assert_eq!(tx.fee_currency_address(), Some(Address::repeat_byte(0x76)));
		assert_eq!(tx.typed().unwrap().signing_hash(), signing_hash(&request).unwrap());

		let again = serialize_transaction(&tx.request, Some(&tx.signature.unwrap().components().unwrap())).unwrap();
		assert_eq!(again, raw);
	}

	#[test]
	fn chain_id_from_signature() {
		let keypair = Random.generate().unwrap();
		let request = TransactionRequest { nonce: Some(1.into()), gas_price: Some(1.into()), ..Default::default() };
		let with_chain = TransactionRequest { chain_id: Some(42220), ..request.clone() };
		let signature = ethkey::sign(keypair.secret(), &signing_hash(&with_chain).unwrap()).unwrap();

		let mut components = SignatureComponents::from(signature);
		components.v = eip155_methods::add_chain_replay_protection(components.recovery_param, 42220).unwrap();
		let raw = serialize_transaction(&request, Some(&components)).unwrap();
		assert_eq!(raw, serialize_transaction(&with_chain, Some(&components)).unwrap());

		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.chain_id, Some(42220));
		assert_eq!(tx.from(), Some(keypair.address()));

		components.v = 30;
		assert_eq!(serialize_transaction(&request, Some(&components)), Err(Error::InvalidChainId));
	}

	#[test]
	fn bad_parity_is_soft() {
		// 0x02 vector with v = 2
		let mut raw = bytes("02f8710103830f42408518ad0849c4825208941749b8eccc622d81600ab7fa322a17b99def83d2876b803d5ccd438580c001a08303e62f4d7779b09ab9daeaef868a8ad3bc937b435a60e8cc432d224bd8b1fba0520ae4b5906f3978ff413eef4131c1d246b15eb676a19324ce9ad23ac48aa987");
		let v_at = raw.len() - 67;
		assert_eq!(raw[v_at], 0x01);
		raw[v_at] = 0x02;

		let tx = parse_transaction(&raw).unwrap();
		assert!(tx.is_signed());
		assert_eq!(tx.signature.unwrap().recovery_param, None);
		assert_eq!(tx.from(), None);
		match tx.sender {
			Sender::Unrecoverable(_) => (),
			ref other => panic!("expected an unrecoverable sender, got {:?}", other),
		}
		assert!(tx.hash.is_some());
	}

	#[test]
	fn malformed_inputs() {
		assert_eq!(parse_transaction(&[]), Err(Error::InvalidRawTransaction(DecoderError::RlpIsTooShort)));
		assert_eq!(parse_transaction(&[0x01, 0xc0]), Err(Error::UnsupportedTxType(0x01)));
		assert!(parse_transaction(&[0x02]).unwrap_err().is_malformed());
		assert!(parse_transaction(&[0x02, 0x80]).unwrap_err().is_malformed());
		// trailing byte after the list
		assert!(parse_transaction(&[0xc0, 0x00]).unwrap_err().is_malformed());
		assert_eq!(
			parse_transaction(&[0x7b, 0xc0]),
			Err(Error::InvalidItemCount { tx_type: TxType::Cip64, found: 0 })
		);
	}

	#[test]
	fn unsigned_legacy_without_chain_id() {
		let request = TransactionRequest {
			nonce: Some(1.into()),
			gas_price: Some(1.into()),
			to: Some(Address::repeat_byte(0x42).into()),
			value: Some(1.into()),
			..Default::default()
		};
		let raw = serialize_transaction(&request, None).unwrap();
		assert_eq!(Rlp::new(&raw).item_count().unwrap(), 6);

		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.chain_id, Some(0));
		assert_eq!(tx.rlp_bytes().unwrap(), raw);
	}

	#[test]
	fn zero_chain_marker_is_canonicalized() {
		// [nonce, gasPrice, gasLimit, to, value, data, 0, 0, 0]
		let raw = bytes("c9808080808080808080");
		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.chain_id, Some(0));
		assert_eq!(tx.sender, Sender::Unsigned);
		// chain id 0 carries no EIP-155 tail, so the marker is dropped
		assert_eq!(tx.rlp_bytes().unwrap(), bytes("c6808080808080"));
	}

	#[test]
	fn lenient_addresses_on_parse() {
		// [nonce, gasPrice, gasLimit, to: 3 bytes, value, data]
		let raw = bytes("c980808083aabbcc8080");
		let tx = parse_transaction(&raw).unwrap();
		assert_eq!(tx.to, Some(AddressField::Raw(vec![0xaa, 0xbb, 0xcc])));
		assert_eq!(tx.sender, Sender::Unsigned);
		assert!(tx.rlp_bytes().unwrap_err().is_validation());
	}
}
