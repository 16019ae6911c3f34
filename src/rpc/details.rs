//! google.rpc detail-block wire types.
//!
//! This module provides manual prost::Message implementations for the
//! status-detail messages the classifier consumes, matching the google.rpc
//! wire shapes bit-exactly without proto codegen.
//!
//! Four block types matter to classification: PreconditionFailure,
//! ResourceInfo, ErrorInfo, and BadRequest. Blocks are carried inside a
//! status as google.protobuf.Any values; unrecognized type URLs are
//! ignored for forward compatibility.

use prost::{DecodeError, Message};
use std::collections::HashMap;

/// Type URL identifying a PreconditionFailure block.
pub const PRECONDITION_FAILURE_TYPE_URL: &str =
    "type.googleapis.com/google.rpc.PreconditionFailure";

/// Type URL identifying a ResourceInfo block.
pub const RESOURCE_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ResourceInfo";

/// Type URL identifying an ErrorInfo block.
pub const ERROR_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";

/// Type URL identifying a BadRequest block.
pub const BAD_REQUEST_TYPE_URL: &str = "type.googleapis.com/google.rpc.BadRequest";

// ============================================================================
// AnyDetail (google.protobuf.Any)
// ============================================================================

/// Wire-format google.protobuf.Any carrying one typed detail block.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct AnyDetail {
    pub type_url: String, // field 1
    pub value: Vec<u8>,   // field 2
}

impl AnyDetail {
    /// Pack a message under the given type URL.
    pub fn pack(type_url: &str, message: &impl Message) -> Self {
        Self {
            type_url: type_url.to_string(),
            value: message.encode_to_vec(),
        }
    }
}

impl Message for AnyDetail {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if !self.type_url.is_empty() {
            prost::encoding::string::encode(1, &self.type_url, buf);
        }
        if !self.value.is_empty() {
            prost::encoding::bytes::encode(2, &self.value, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::string::merge(wire_type, &mut self.type_url, buf, ctx),
            2 => prost::encoding::bytes::merge(wire_type, &mut self.value, buf, ctx),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.type_url.is_empty() {
            len += prost::encoding::string::encoded_len(1, &self.type_url);
        }
        if !self.value.is_empty() {
            len += prost::encoding::bytes::encoded_len(2, &self.value);
        }
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Status (google.rpc.Status)
// ============================================================================

/// Wire-format google.rpc.Status as carried in `grpc-status-details-bin`.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Status {
    pub code: i32,               // field 1
    pub message: String,         // field 2
    pub details: Vec<AnyDetail>, // field 3
}

impl Message for Status {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if self.code != 0 {
            prost::encoding::int32::encode(1, &self.code, buf);
        }
        if !self.message.is_empty() {
            prost::encoding::string::encode(2, &self.message, buf);
        }
        prost::encoding::message::encode_repeated(3, &self.details, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::int32::merge(wire_type, &mut self.code, buf, ctx),
            2 => prost::encoding::string::merge(wire_type, &mut self.message, buf, ctx),
            3 => prost::encoding::message::merge_repeated(wire_type, &mut self.details, buf, ctx),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if self.code != 0 {
            len += prost::encoding::int32::encoded_len(1, &self.code);
        }
        if !self.message.is_empty() {
            len += prost::encoding::string::encoded_len(2, &self.message);
        }
        len += prost::encoding::message::encoded_len_repeated(3, &self.details);
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// PreconditionFailure (google.rpc.PreconditionFailure)
// ============================================================================

/// Wire-format google.rpc.PreconditionFailure.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct PreconditionFailure {
    pub violations: Vec<PreconditionViolation>, // field 1
}

impl Message for PreconditionFailure {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        prost::encoding::message::encode_repeated(1, &self.violations, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => {
                prost::encoding::message::merge_repeated(wire_type, &mut self.violations, buf, ctx)
            }
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        prost::encoding::message::encoded_len_repeated(1, &self.violations)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One violation entry inside a PreconditionFailure block.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct PreconditionViolation {
    pub violation_type: String, // field 1 (wire name: type)
    pub subject: String,        // field 2
    pub description: String,    // field 3
}

impl Message for PreconditionViolation {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if !self.violation_type.is_empty() {
            prost::encoding::string::encode(1, &self.violation_type, buf);
        }
        if !self.subject.is_empty() {
            prost::encoding::string::encode(2, &self.subject, buf);
        }
        if !self.description.is_empty() {
            prost::encoding::string::encode(3, &self.description, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::string::merge(wire_type, &mut self.violation_type, buf, ctx),
            2 => prost::encoding::string::merge(wire_type, &mut self.subject, buf, ctx),
            3 => prost::encoding::string::merge(wire_type, &mut self.description, buf, ctx),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.violation_type.is_empty() {
            len += prost::encoding::string::encoded_len(1, &self.violation_type);
        }
        if !self.subject.is_empty() {
            len += prost::encoding::string::encoded_len(2, &self.subject);
        }
        if !self.description.is_empty() {
            len += prost::encoding::string::encoded_len(3, &self.description);
        }
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// ResourceInfo (google.rpc.ResourceInfo)
// ============================================================================

/// Wire-format google.rpc.ResourceInfo.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ResourceInfo {
    pub resource_type: String, // field 1
    pub resource_name: String, // field 2
    pub owner: String,         // field 3
    pub description: String,   // field 4
}

impl Message for ResourceInfo {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if !self.resource_type.is_empty() {
            prost::encoding::string::encode(1, &self.resource_type, buf);
        }
        if !self.resource_name.is_empty() {
            prost::encoding::string::encode(2, &self.resource_name, buf);
        }
        if !self.owner.is_empty() {
            prost::encoding::string::encode(3, &self.owner, buf);
        }
        if !self.description.is_empty() {
            prost::encoding::string::encode(4, &self.description, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::string::merge(wire_type, &mut self.resource_type, buf, ctx),
            2 => prost::encoding::string::merge(wire_type, &mut self.resource_name, buf, ctx),
            3 => prost::encoding::string::merge(wire_type, &mut self.owner, buf, ctx),
            4 => prost::encoding::string::merge(wire_type, &mut self.description, buf, ctx),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.resource_type.is_empty() {
            len += prost::encoding::string::encoded_len(1, &self.resource_type);
        }
        if !self.resource_name.is_empty() {
            len += prost::encoding::string::encoded_len(2, &self.resource_name);
        }
        if !self.owner.is_empty() {
            len += prost::encoding::string::encoded_len(3, &self.owner);
        }
        if !self.description.is_empty() {
            len += prost::encoding::string::encoded_len(4, &self.description);
        }
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// ErrorInfo (google.rpc.ErrorInfo)
// ============================================================================

/// Wire-format google.rpc.ErrorInfo.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ErrorInfo {
    pub reason: String,                    // field 1
    pub domain: String,                    // field 2
    pub metadata: HashMap<String, String>, // field 3
}

impl Message for ErrorInfo {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if !self.reason.is_empty() {
            prost::encoding::string::encode(1, &self.reason, buf);
        }
        if !self.domain.is_empty() {
            prost::encoding::string::encode(2, &self.domain, buf);
        }
        prost::encoding::hash_map::encode(
            prost::encoding::string::encode,
            prost::encoding::string::encoded_len,
            prost::encoding::string::encode,
            prost::encoding::string::encoded_len,
            3,
            &self.metadata,
            buf,
        );
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::string::merge(wire_type, &mut self.reason, buf, ctx),
            2 => prost::encoding::string::merge(wire_type, &mut self.domain, buf, ctx),
            3 => prost::encoding::hash_map::merge(
                prost::encoding::string::merge,
                prost::encoding::string::merge,
                &mut self.metadata,
                buf,
                ctx,
            ),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.reason.is_empty() {
            len += prost::encoding::string::encoded_len(1, &self.reason);
        }
        if !self.domain.is_empty() {
            len += prost::encoding::string::encoded_len(2, &self.domain);
        }
        len += prost::encoding::hash_map::encoded_len(
            prost::encoding::string::encoded_len,
            prost::encoding::string::encoded_len,
            3,
            &self.metadata,
        );
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// BadRequest (google.rpc.BadRequest)
// ============================================================================

/// Wire-format google.rpc.BadRequest.
///
/// Decoded for diagnostic context only; classification does not branch
/// on its contents.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct BadRequest {
    pub field_violations: Vec<FieldViolation>, // field 1
}

impl Message for BadRequest {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        prost::encoding::message::encode_repeated(1, &self.field_violations, buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::message::merge_repeated(
                wire_type,
                &mut self.field_violations,
                buf,
                ctx,
            ),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        prost::encoding::message::encoded_len_repeated(1, &self.field_violations)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One field violation inside a BadRequest block.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct FieldViolation {
    pub field: String,       // field 1
    pub description: String, // field 2
}

impl Message for FieldViolation {
    fn encode_raw(&self, buf: &mut impl prost::bytes::BufMut)
    where
        Self: Sized,
    {
        if !self.field.is_empty() {
            prost::encoding::string::encode(1, &self.field, buf);
        }
        if !self.description.is_empty() {
            prost::encoding::string::encode(2, &self.description, buf);
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: prost::encoding::WireType,
        buf: &mut impl prost::bytes::Buf,
        ctx: prost::encoding::DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        match tag {
            1 => prost::encoding::string::merge(wire_type, &mut self.field, buf, ctx),
            2 => prost::encoding::string::merge(wire_type, &mut self.description, buf, ctx),
            _ => prost::encoding::skip_field(wire_type, tag, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let mut len = 0;
        if !self.field.is_empty() {
            len += prost::encoding::string::encoded_len(1, &self.field);
        }
        if !self.description.is_empty() {
            len += prost::encoding::string::encoded_len(2, &self.description);
        }
        len
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Decoded view
// ============================================================================

/// Typed view over the detail blocks attached to one status.
///
/// The first block of each recognized type wins; unknown type URLs and
/// undecodable payloads are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedDetails {
    /// Precondition-failure block, if present.
    pub precondition_failure: Option<PreconditionFailure>,
    /// Resource-info block, if present.
    pub resource_info: Option<ResourceInfo>,
    /// Error-info block, if present.
    pub error_info: Option<ErrorInfo>,
    /// Bad-request block, if present.
    pub bad_request: Option<BadRequest>,
}

impl DecodedDetails {
    /// Decode the recognized blocks out of a status's detail list.
    pub fn from_details(details: &[AnyDetail]) -> Self {
        let mut decoded = Self::default();
        for detail in details {
            let value = detail.value.as_slice();
            match detail.type_url.as_str() {
                PRECONDITION_FAILURE_TYPE_URL if decoded.precondition_failure.is_none() => {
                    decoded.precondition_failure = PreconditionFailure::decode(value).ok();
                }
                RESOURCE_INFO_TYPE_URL if decoded.resource_info.is_none() => {
                    decoded.resource_info = ResourceInfo::decode(value).ok();
                }
                ERROR_INFO_TYPE_URL if decoded.error_info.is_none() => {
                    decoded.error_info = ErrorInfo::decode(value).ok();
                }
                BAD_REQUEST_TYPE_URL if decoded.bad_request.is_none() => {
                    decoded.bad_request = BadRequest::decode(value).ok();
                }
                _ => {}
            }
        }
        decoded
    }

    /// Type of the first precondition violation, if any.
    pub fn first_violation_type(&self) -> Option<&str> {
        self.precondition_failure
            .as_ref()
            .and_then(|block| block.violations.first())
            .map(|violation| violation.violation_type.as_str())
    }

    /// Resource type from the resource-info block, if any.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_info
            .as_ref()
            .map(|info| info.resource_type.as_str())
    }

    /// Resource name from the resource-info block, if any.
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_info
            .as_ref()
            .map(|info| info.resource_name.as_str())
    }

    /// Reason code from the error-info block, if any.
    pub fn error_reason(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.reason.as_str())
    }
}
