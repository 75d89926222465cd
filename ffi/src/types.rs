//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use members_core::error::ApiError;
use members_core::http::HttpMethod;
use members_core::types::{Member, PersonRole};

/// Opaque handle to a `MemberClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiMemberClient {
    pub(crate) inner: members_core::MemberClient,
}

fn c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap().into_raw()
}

fn c_string_opt(s: Option<String>) -> *mut c_char {
    match s {
        Some(s) => c_string(s),
        None => std::ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum. The member API is consumed read-only.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `members_build_*` functions. The C caller executes the request
/// and passes the response back through `members_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: members_core::HttpRequest) -> *mut Self {
        let path = c_string(req.path);
        let body = c_string_opt(req.body);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let mut ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            let ptr = ffi_headers.as_mut_ptr();
            std::mem::forget(ffi_headers);
            ptr
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `members_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiMemberResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Transport = 3,
    Deserialization = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `members_free_result` what `FfiMemberResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    Member = 1,
    MemberList = 2,
}

/// A role entry exposed to C.
#[repr(C)]
pub struct FfiPersonRole {
    pub id: u64,
    pub role_type: *mut c_char,
    pub active: bool,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
}

/// A member exposed to C. `mobile` and `gender_code` may be null.
#[repr(C)]
pub struct FfiMember {
    pub id: u64,
    pub first_name: *mut c_char,
    pub last_name: *mut c_char,
    pub email: *mut c_char,
    pub mobile: *mut c_char,
    pub date_of_birth: *mut c_char,
    pub gender_code: *mut c_char,
    pub street: *mut c_char,
    pub city: *mut c_char,
    pub zip_code: *mut c_char,
    pub created_at: *mut c_char,
    pub updated_at: *mut c_char,
    pub person_roles: *mut FfiPersonRole,
    pub person_roles_len: u32,
}

/// A list of members exposed to C.
#[repr(C)]
pub struct FfiMemberList {
    pub items: *mut FfiMember,
    pub len: u32,
}

fn ffi_role_from_core(role: PersonRole) -> FfiPersonRole {
    FfiPersonRole {
        id: role.id,
        role_type: c_string(role.r#type),
        active: role.active,
        created_at: c_string(role.created_at),
        updated_at: c_string(role.updated_at),
    }
}

pub(crate) fn ffi_member_from_core(member: Member) -> FfiMember {
    let person_roles_len = member.person_roles.len() as u32;
    let person_roles = if member.person_roles.is_empty() {
        std::ptr::null_mut()
    } else {
        let mut roles: Vec<FfiPersonRole> =
            member.person_roles.into_iter().map(ffi_role_from_core).collect();
        let ptr = roles.as_mut_ptr();
        std::mem::forget(roles);
        ptr
    };

    FfiMember {
        id: member.id,
        first_name: c_string(member.first_name),
        last_name: c_string(member.last_name),
        email: c_string(member.email),
        mobile: c_string_opt(member.mobile),
        date_of_birth: c_string(member.date_of_birth),
        gender_code: c_string_opt(member.gender_code),
        street: c_string(member.street),
        city: c_string(member.city),
        zip_code: c_string(member.zip_code),
        created_at: c_string(member.created_at),
        updated_at: c_string(member.updated_at),
        person_roles,
        person_roles_len,
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiMemberResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiMemberResult {
    /// Build a success result carrying a single `FfiMember`.
    pub(crate) fn ok_member(member: Member) -> *mut Self {
        let ffi_member = Box::new(ffi_member_from_core(member));
        let result = Box::new(FfiMemberResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag: FfiDataTag::Member,
            data: Box::into_raw(ffi_member) as *mut std::ffi::c_void,
        });
        Box::into_raw(result)
    }

    /// Build a success result carrying a `FfiMemberList`.
    pub(crate) fn ok_member_list(members: Vec<Member>) -> *mut Self {
        let len = members.len() as u32;
        let mut ffi_members: Vec<FfiMember> =
            members.into_iter().map(ffi_member_from_core).collect();

        let items = if ffi_members.is_empty() {
            std::ptr::null_mut()
        } else {
            let ptr = ffi_members.as_mut_ptr();
            std::mem::forget(ffi_members);
            ptr
        };

        let ffi_list = Box::new(FfiMemberList { items, len });
        let result = Box::new(FfiMemberResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag: FfiDataTag::MemberList,
            data: Box::into_raw(ffi_list) as *mut std::ffi::c_void,
        });
        Box::into_raw(result)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status, msg) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16, err.to_string()),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status, err.to_string()),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0, err.to_string()),
            ApiError::DeserializationError(_) => {
                (FfiErrorCode::Deserialization, 0, err.to_string())
            }
        };

        let result = Box::new(FfiMemberResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let result = Box::new(FfiMemberResult {
            error_code: FfiErrorCode::NullArg,
            error_message: c_string(format!("null argument: {name}")),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let result = Box::new(FfiMemberResult {
            error_code: FfiErrorCode::Panic,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }
}
