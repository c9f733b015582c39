//! JavaScript run inside the router's web page.
//!
//! The page scripts are fixed text. Everything that varies per run (API
//! paths, session values, the XML body, the new address) is handed over as
//! WebDriver script arguments, so nothing the operator typed is ever spliced
//! into code that the browser evaluates.

use hilink_xml::WriteError;
use serde_json::Value;

use crate::defaults::DeviceApi;
use crate::dhcp::ChangePlan;

/// `document.readyState` of the current page.
pub const READY_STATE: &str = "return document.readyState;";

/// Synchronous GET of `arguments[0]`, returning the body text.
pub const FETCH_SESSION_TOKEN: &str = r#"
var xhr = new XMLHttpRequest();
xhr.open('GET', arguments[0], false);
xhr.send();
return xhr.responseText;
"#;

/// Sets the session cookie (`arguments[0]`), then POSTs the XML body
/// (`arguments[3]`) to `arguments[1]` with the verification token
/// (`arguments[2]`). Returns the response body.
pub const SUBMIT_DHCP_SETTINGS: &str = r#"
document.cookie = 'SessionID=' + arguments[0];
var xhr = new XMLHttpRequest();
xhr.open('POST', arguments[1], false);
xhr.setRequestHeader('__RequestVerificationToken', arguments[2]);
xhr.setRequestHeader('Content-Type', 'text/xml');
xhr.send(arguments[3]);
return xhr.responseText;
"#;

/// Calls the web UI's own DHCP setter when the EMUI bundle exposes one.
pub const EMUI_SET_DHCP: &str = r#"
if (typeof EMUI !== 'undefined' && EMUI.api && EMUI.api.dhcp &&
        typeof EMUI.api.dhcp.setSettings === 'function') {
    EMUI.api.dhcp.setSettings({
        DhcpIPAddress: arguments[0],
        DhcpLanNetmask: arguments[1]
    });
    return true;
}
return false;
"#;

/// Overwrites every form input whose name contains `ip`; returns the count.
pub const FILL_IP_INPUTS: &str = r#"
var newIp = arguments[0];
var updated = 0;
document.querySelectorAll('form').forEach(function (form) {
    form.querySelectorAll('input').forEach(function (input) {
        if (input.name && input.name.includes('ip')) {
            input.value = newIp;
            updated++;
        }
    });
});
return updated;
"#;

pub fn fetch_session_token_args(api: &DeviceApi) -> Vec<Value> {
    vec![Value::from(api.session_token_path.as_str())]
}

pub fn submit_dhcp_settings_args(
    api: &DeviceApi,
    session_id: &str,
    token: &str,
    payload: &str,
) -> Vec<Value> {
    vec![
        Value::from(session_id),
        Value::from(api.dhcp_settings_path.as_str()),
        Value::from(token),
        Value::from(payload),
    ]
}

/// One-line script an operator can paste into the browser console at the
/// router's current address to perform the same change by hand.
pub fn manual_console_snippet(plan: &ChangePlan, api: &DeviceApi) -> Result<String, WriteError> {
    let body = js_string(&plan.dhcp.payload()?);
    let token_path = js_string(&api.session_token_path);
    let settings_path = js_string(&api.dhcp_settings_path);
    let done = js_string(&format!("Success! Device will reboot to {}", plan.new));

    Ok(format!(
        "fetch({token_path}).then(r=>r.text()).then(t=>{{\
let s=t.match(/SessionID=([^<]+)/)[1],k=t.match(/TokInfo>([^<]+)/)[1];\
document.cookie='SessionID='+s;\
fetch({settings_path},{{method:'POST',headers:{{'__RequestVerificationToken':k,'Content-Type':'text/xml'}},body:{body}}})\
.then(r=>alert(r.ok?{done}:'Failed'))}})"
    ))
}

// A JSON string literal is also a valid JavaScript string literal.
fn js_string(text: &str) -> String {
    Value::from(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::{manual_console_snippet, submit_dhcp_settings_args, FILL_IP_INPUTS};
    use crate::defaults::DeviceDefaults;
    use crate::dhcp::ChangePlan;
    use serde_json::Value;
    use std::net::Ipv4Addr;

    fn plan(defaults: &DeviceDefaults) -> ChangePlan {
        ChangePlan::new(
            Ipv4Addr::new(192, 168, 8, 1),
            Ipv4Addr::new(10, 0, 0, 1),
            &defaults.dhcp,
        )
    }

    #[test]
    fn snippet_carries_payload_and_paths() {
        let defaults = DeviceDefaults::embedded().expect("defaults");
        let snippet = manual_console_snippet(&plan(&defaults), &defaults.device).expect("snippet");

        assert!(snippet.starts_with("fetch(\"/api/webserver/SesTokInfo\")"));
        assert!(snippet.contains("fetch(\"/api/dhcp/settings\""));
        assert!(snippet.contains("<DhcpIPAddress>10.0.0.1</DhcpIPAddress>"));
        assert!(snippet.contains("<DhcpStartIPAddress>10.0.0.100</DhcpStartIPAddress>"));
        assert!(snippet.contains("<DhcpEndIPAddress>10.0.0.200</DhcpEndIPAddress>"));
        assert!(snippet.contains("encoding=\\\"UTF-8\\\""));
        assert!(snippet.contains("Success! Device will reboot to 10.0.0.1"));
        assert!(!snippet.contains('\n'));
    }

    #[test]
    fn submit_arguments_are_positional() {
        let defaults = DeviceDefaults::embedded().expect("defaults");
        let args = submit_dhcp_settings_args(&defaults.device, "sid", "tok", "<request/>");
        assert_eq!(
            args,
            vec![
                Value::from("sid"),
                Value::from("/api/dhcp/settings"),
                Value::from("tok"),
                Value::from("<request/>"),
            ]
        );
    }

    #[test]
    fn form_fill_captures_argument_outside_callbacks() {
        let first_use = FILL_IP_INPUTS.find("arguments[0]").expect("argument used");
        assert!(first_use < FILL_IP_INPUTS.find("forEach").expect("loop present"));
        assert_eq!(FILL_IP_INPUTS.matches("arguments").count(), 1);
    }
}
