//! C-ABI wrapper around `members-core`.
//!
//! # Overview
//! Exposes the member fetch API and the avatar resolver through `extern "C"`
//! functions so any language with a C FFI can build and parse HTTP
//! requests/responses without linking to serde directly. View state and the
//! avatar toggle stay host-side; a native shell owns its own screen
//! lifecycle.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiMemberResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `members_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use members_core::avatar::{avatar_for, AvatarImage};
use members_core::http::HttpResponse;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `MemberClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `members_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn members_client_new(base_url: *const c_char) -> *mut FfiMemberClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { CStr::from_ptr(base_url) }.to_str().unwrap_or("");
        let client = members_core::MemberClient::new(url);
        Box::into_raw(Box::new(FfiMemberClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `MemberClient` created by `members_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn members_client_free(client: *mut FfiMemberClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for listing all members.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `members_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn members_build_list_members(
    client: *const FfiMemberClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let req = client.inner.build_list_members();
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for fetching a single member by id.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn members_build_get_member(
    client: *const FfiMemberClient,
    id: u64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let req = client.inner.build_get_member(id);
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .unwrap_or("")
            .to_string()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse an HTTP response from a list-members request.
///
/// Returns a result with `data_tag = MemberList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn members_parse_list_members(
    client: *const FfiMemberClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMemberResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMemberResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMemberResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_list_members(core_resp) {
            Ok(members) => FfiMemberResult::ok_member_list(members),
            Err(e) => FfiMemberResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMemberResult::panic("panic in members_parse_list_members"))
}

/// Parse an HTTP response from a get-member request.
///
/// Returns a result with `data_tag = Member` on success.
#[unsafe(no_mangle)]
pub extern "C" fn members_parse_get_member(
    client: *const FfiMemberClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMemberResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMemberResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMemberResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_get_member(core_resp) {
            Ok(member) => FfiMemberResult::ok_member(member),
            Err(e) => FfiMemberResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMemberResult::panic("panic in members_parse_get_member"))
}

// ---------------------------------------------------------------------------
// Avatar resolver
// ---------------------------------------------------------------------------

/// Asset file name for a gender code: "girl-bw.png" for a case-insensitive
/// "female", "boy-bw.png" for anything else (null included).
///
/// The returned pointer is to a static string; do NOT free it.
#[unsafe(no_mangle)]
pub extern "C" fn members_avatar_asset(gender_code: *const c_char) -> *const c_char {
    catch_unwind(|| {
        let code = if gender_code.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(gender_code) }.to_str().unwrap_or(""))
        };
        match avatar_for(code) {
            AvatarImage::Female => c"girl-bw.png".as_ptr(),
            AvatarImage::Male => c"boy-bw.png".as_ptr(),
        }
    })
    .unwrap_or(c"boy-bw.png".as_ptr())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `members_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn members_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Vec::from_raw_parts(req.headers, req.headers_len as usize, req.headers_len as usize)
            };
            for h in headers {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiMemberResult` returned by any `members_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn members_free_result(result: *mut FfiMemberResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Member => {
                    let member = unsafe { Box::from_raw(result.data as *mut FfiMember) };
                    free_ffi_member_fields(&member);
                }
                FfiDataTag::MemberList => {
                    let list = unsafe { Box::from_raw(result.data as *mut FfiMemberList) };
                    if !list.items.is_null() && list.len > 0 {
                        let items = unsafe {
                            Vec::from_raw_parts(list.items, list.len as usize, list.len as usize)
                        };
                        for item in &items {
                            free_ffi_member_fields(item);
                        }
                    }
                }
                FfiDataTag::None => {}
            }
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free the C-string fields of an `FfiMember` and its role entries (but not
/// the struct itself).
fn free_ffi_member_fields(member: &FfiMember) {
    free_c_string(member.first_name);
    free_c_string(member.last_name);
    free_c_string(member.email);
    free_c_string(member.mobile);
    free_c_string(member.date_of_birth);
    free_c_string(member.gender_code);
    free_c_string(member.street);
    free_c_string(member.city);
    free_c_string(member.zip_code);
    free_c_string(member.created_at);
    free_c_string(member.updated_at);
    if !member.person_roles.is_null() && member.person_roles_len > 0 {
        let roles = unsafe {
            Vec::from_raw_parts(
                member.person_roles,
                member.person_roles_len as usize,
                member.person_roles_len as usize,
            )
        };
        for role in &roles {
            free_c_string(role.role_type);
            free_c_string(role.created_at);
            free_c_string(role.updated_at);
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn members_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const BASE_URL: &str = "http://localhost:8000/api/v1";

    fn new_client() -> *mut FfiMemberClient {
        let url = CString::new(BASE_URL).unwrap();
        members_client_new(url.as_ptr())
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        members_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let client = members_client_new(std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        members_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_list_members_returns_correct_request() {
        let client = new_client();
        let req = members_build_list_members(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));

        let path = unsafe { CStr::from_ptr(req_ref.path) }.to_str().unwrap();
        assert_eq!(path, "http://localhost:8000/api/v1/people");

        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        members_free_request(req);
        members_client_free(client);
    }

    #[test]
    fn build_get_member_appends_id() {
        let client = new_client();
        let req = members_build_get_member(client, 42);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        let path = unsafe { CStr::from_ptr(req_ref.path) }.to_str().unwrap();
        assert_eq!(path, "http://localhost:8000/api/v1/people/42");

        members_free_request(req);
        members_client_free(client);
    }

    #[test]
    fn build_list_members_null_client_returns_null() {
        let req = members_build_list_members(std::ptr::null());
        assert!(req.is_null());
    }

    #[test]
    fn parse_get_member_success() {
        let client = new_client();
        let body = CString::new(
            r#"{"id":1,"first_name":"Ada","last_name":"Lovelace","email":"ada@x.io",
                "mobile":null,"date_of_birth":"1815-12-10","gender_code":"female",
                "street":"12 St James Square","city":"London","zip_code":"SW1Y",
                "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z",
                "person_roles":[{"id":10,"type":"volunteer","active":true,
                    "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}]}"#,
        )
        .unwrap();
        let response = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };

        let result = members_parse_get_member(client, &response);
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::Ok));
        assert!(matches!(result_ref.data_tag, FfiDataTag::Member));

        let member = unsafe { &*(result_ref.data as *const FfiMember) };
        assert_eq!(member.id, 1);
        let first = unsafe { CStr::from_ptr(member.first_name) }.to_str().unwrap();
        assert_eq!(first, "Ada");
        assert!(member.mobile.is_null());
        assert_eq!(member.person_roles_len, 1);
        let role = unsafe { &*member.person_roles };
        let role_type = unsafe { CStr::from_ptr(role.role_type) }.to_str().unwrap();
        assert_eq!(role_type, "volunteer");

        members_free_result(result);
        members_client_free(client);
    }

    #[test]
    fn parse_list_members_empty() {
        let client = new_client();
        let body = CString::new("[]").unwrap();
        let response = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };

        let result = members_parse_list_members(client, &response);
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::Ok));
        let list = unsafe { &*(result_ref.data as *const FfiMemberList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());

        members_free_result(result);
        members_client_free(client);
    }

    #[test]
    fn parse_get_member_not_found_carries_status() {
        let client = new_client();
        let body = CString::new("").unwrap();
        let response = FfiHttpResponse {
            status: 404,
            body: body.as_ptr(),
        };

        let result = members_parse_get_member(client, &response);
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::NotFound));
        assert_eq!(result_ref.http_status, 404);
        let msg = unsafe { CStr::from_ptr(result_ref.error_message) }.to_str().unwrap();
        assert!(!msg.is_empty());

        members_free_result(result);
        members_client_free(client);
    }

    #[test]
    fn parse_null_args_are_reported() {
        let client = new_client();
        let result = members_parse_list_members(client, std::ptr::null());
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::NullArg));
        members_free_result(result);
        members_client_free(client);

        let result = members_parse_list_members(std::ptr::null(), std::ptr::null());
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::NullArg));
        members_free_result(result);
    }

    #[test]
    fn avatar_asset_selection() {
        let female = CString::new("FEMALE").unwrap();
        let asset = members_avatar_asset(female.as_ptr());
        assert_eq!(unsafe { CStr::from_ptr(asset) }.to_str().unwrap(), "girl-bw.png");

        let male = CString::new("male").unwrap();
        let asset = members_avatar_asset(male.as_ptr());
        assert_eq!(unsafe { CStr::from_ptr(asset) }.to_str().unwrap(), "boy-bw.png");

        let asset = members_avatar_asset(std::ptr::null());
        assert_eq!(unsafe { CStr::from_ptr(asset) }.to_str().unwrap(), "boy-bw.png");
    }

    #[test]
    fn free_functions_accept_null() {
        members_free_request(std::ptr::null_mut());
        members_free_result(std::ptr::null_mut());
        members_free_string(std::ptr::null_mut());
    }

    #[test]
    fn list_flow_against_live_server() {
        // Spin the seeded mock server and run the build/execute/parse cycle
        // the way a C host would.
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        let url = CString::new(format!("http://{addr}/api/v1")).unwrap();
        let client = members_client_new(url.as_ptr());
        let req = members_build_list_members(client);
        let path = unsafe { CStr::from_ptr((*req).path) }.to_str().unwrap().to_string();
        members_free_request(req);

        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        let mut response = agent.get(&path).call().expect("HTTP transport error");
        let status = response.status().as_u16();
        let body = CString::new(response.body_mut().read_to_string().unwrap_or_default()).unwrap();

        let ffi_response = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        let result = members_parse_list_members(client, &ffi_response);
        let result_ref = unsafe { &*result };
        assert!(matches!(result_ref.error_code, FfiErrorCode::Ok));
        let list = unsafe { &*(result_ref.data as *const FfiMemberList) };
        assert_eq!(list.len, 3);
        let first = unsafe { &*list.items };
        assert_eq!(first.id, 1);

        members_free_result(result);
        members_client_free(client);
    }
}
