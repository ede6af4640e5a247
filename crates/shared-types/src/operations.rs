//! # Operations
//!
//! Closed catalog of the operations this client builds, plus an opaque
//! fallback for every other tag a node may return.
//!
//! JSON form is the Graphene `[tag, body]` pair. Consensus form is the
//! varint tag followed by the body fields in declaration order (fee first).

use crate::asset::AssetAmount;
use crate::errors::TypesError;
use crate::object_id::ObjectId;
use crate::time::Time;
use ol_01_encoding::{ConsensusEncode, Encoder, EncodingError};
use serde::ser::SerializeTuple;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// =============================================================================
// OPERATION TYPES
// =============================================================================

/// Operation tags. The ordinals are fixed by the chain protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum OpType {
    Transfer = 0,
    LimitOrderCreate = 1,
    LimitOrderCancel = 2,
    CallOrderUpdate = 3,
    FillOrder = 4,
}

impl OpType {
    /// Every known tag, in ordinal order.
    pub const ALL: [OpType; 5] = [
        OpType::Transfer,
        OpType::LimitOrderCreate,
        OpType::LimitOrderCancel,
        OpType::CallOrderUpdate,
        OpType::FillOrder,
    ];

    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for OpType {
    type Error = TypesError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        OpType::ALL
            .into_iter()
            .find(|op| op.code() == value)
            .ok_or(TypesError::UnknownOpType(value))
    }
}

impl Serialize for OpType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

// =============================================================================
// VARIANTS
// =============================================================================

/// Encrypted transfer memo. Carried through JSON only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub from: String,
    pub to: String,
    pub nonce: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub fee: AssetAmount,
    pub from: ObjectId,
    pub to: ObjectId,
    pub amount: AssetAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<Memo>,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

impl TransferOperation {
    /// Transfer without a memo.
    pub fn new(from: ObjectId, to: ObjectId, amount: AssetAmount, fee: AssetAmount) -> Self {
        Self {
            fee,
            from,
            to,
            amount,
            memo: None,
            extensions: Vec::new(),
        }
    }
}

impl ConsensusEncode for TransferOperation {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode(&self.fee)?;
        encoder.encode(&self.from)?;
        encoder.encode(&self.to)?;
        encoder.encode(&self.amount)?;
        if self.memo.is_some() {
            return Err(EncodingError::Unsupported("transfer memo"));
        }
        encoder.encode_u8(0);
        encode_empty_extensions(encoder, &self.extensions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    pub fee: AssetAmount,
    pub seller: ObjectId,
    pub amount_to_sell: AssetAmount,
    pub min_to_receive: AssetAmount,
    pub expiration: Time,
    pub fill_or_kill: bool,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

impl ConsensusEncode for LimitOrderCreateOperation {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode(&self.fee)?;
        encoder.encode(&self.seller)?;
        encoder.encode(&self.amount_to_sell)?;
        encoder.encode(&self.min_to_receive)?;
        encoder.encode(&self.expiration)?;
        encoder.encode_bool(self.fill_or_kill);
        encode_empty_extensions(encoder, &self.extensions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    pub fee: AssetAmount,
    pub fee_paying_account: ObjectId,
    pub order: ObjectId,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

impl ConsensusEncode for LimitOrderCancelOperation {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode(&self.fee)?;
        encoder.encode(&self.fee_paying_account)?;
        encoder.encode(&self.order)?;
        encode_empty_extensions(encoder, &self.extensions)
    }
}

/// Extension sets are always empty for the operations built here.
pub(crate) fn encode_empty_extensions(
    encoder: &mut Encoder,
    extensions: &[Value],
) -> Result<(), EncodingError> {
    if !extensions.is_empty() {
        return Err(EncodingError::Unsupported("non-empty extensions"));
    }
    encoder.encode_uvarint(0);
    Ok(())
}

// =============================================================================
// OPERATION
// =============================================================================

/// A tagged operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Transfer(TransferOperation),
    LimitOrderCreate(LimitOrderCreateOperation),
    LimitOrderCancel(LimitOrderCancelOperation),
    /// Any tag without a modelled body. Preserved for JSON, never signed.
    Unknown { op_type: u16, data: Value },
}

impl Operation {
    /// Numeric tag of this operation.
    pub fn type_code(&self) -> u16 {
        match self {
            Operation::Transfer(_) => OpType::Transfer.code(),
            Operation::LimitOrderCreate(_) => OpType::LimitOrderCreate.code(),
            Operation::LimitOrderCancel(_) => OpType::LimitOrderCancel.code(),
            Operation::Unknown { op_type, .. } => *op_type,
        }
    }

    /// Fee of a modelled operation.
    pub fn fee(&self) -> Option<&AssetAmount> {
        match self {
            Operation::Transfer(op) => Some(&op.fee),
            Operation::LimitOrderCreate(op) => Some(&op.fee),
            Operation::LimitOrderCancel(op) => Some(&op.fee),
            Operation::Unknown { .. } => None,
        }
    }

    pub fn fee_mut(&mut self) -> Option<&mut AssetAmount> {
        match self {
            Operation::Transfer(op) => Some(&mut op.fee),
            Operation::LimitOrderCreate(op) => Some(&mut op.fee),
            Operation::LimitOrderCancel(op) => Some(&mut op.fee),
            Operation::Unknown { .. } => None,
        }
    }

    /// Build an operation from its tag and JSON body.
    pub fn from_tagged(op_type: u16, data: Value) -> Result<Self, serde_json::Error> {
        match OpType::try_from(op_type) {
            Ok(OpType::Transfer) => serde_json::from_value(data).map(Operation::Transfer),
            Ok(OpType::LimitOrderCreate) => {
                serde_json::from_value(data).map(Operation::LimitOrderCreate)
            }
            Ok(OpType::LimitOrderCancel) => {
                serde_json::from_value(data).map(Operation::LimitOrderCancel)
            }
            Ok(OpType::CallOrderUpdate | OpType::FillOrder) | Err(_) => {
                Ok(Operation::Unknown { op_type, data })
            }
        }
    }
}

impl From<TransferOperation> for Operation {
    fn from(op: TransferOperation) -> Self {
        Operation::Transfer(op)
    }
}

impl From<LimitOrderCreateOperation> for Operation {
    fn from(op: LimitOrderCreateOperation) -> Self {
        Operation::LimitOrderCreate(op)
    }
}

impl From<LimitOrderCancelOperation> for Operation {
    fn from(op: LimitOrderCancelOperation) -> Self {
        Operation::LimitOrderCancel(op)
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.type_code())?;
        match self {
            Operation::Transfer(op) => tuple.serialize_element(op)?,
            Operation::LimitOrderCreate(op) => tuple.serialize_element(op)?,
            Operation::LimitOrderCancel(op) => tuple.serialize_element(op)?,
            Operation::Unknown { data, .. } => tuple.serialize_element(data)?,
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (op_type, data) = <(u16, Value)>::deserialize(deserializer)?;
        Operation::from_tagged(op_type, data).map_err(de::Error::custom)
    }
}

impl ConsensusEncode for Operation {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        let body: &dyn ConsensusEncode = match self {
            Operation::Transfer(op) => op,
            Operation::LimitOrderCreate(op) => op,
            Operation::LimitOrderCancel(op) => op,
            Operation::Unknown { op_type, .. } => {
                return Err(EncodingError::UnknownOperation(*op_type))
            }
        };
        encoder.encode_uvarint(u64::from(self.type_code()));
        body.encode(encoder)
    }
}
