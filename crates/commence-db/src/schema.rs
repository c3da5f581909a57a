//! Static enumeration of the external automation surface.
//!
//! Every method name and argument field shape the automation object
//! exposes, as data. This is a reference contract, not executable behavior:
//! the table backs name lookups, error labelling, and documentation dumps.
//! Names are verbatim from the introspected surface, including the
//! lowercase oddities the vendor ships.

use std::collections::HashMap;

use serde::Serialize;

/// One automation method: its name and the field names of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiMethod {
    pub name: &'static str,
    pub params: &'static [&'static str],
}

const fn m(name: &'static str, params: &'static [&'static str]) -> ApiMethod {
    ApiMethod { name, params }
}

/// The full surface, in the vendor's enumeration order.
pub const METHODS: &[ApiMethod] = &[
    m("GetCursor", &["nMode", "nFlag"]),
    m("Version", &[]),
    m("quit", &[]),
    m("IsScriptLevelSupported", &["level"]),
    m("Commit", &["flags"]),
    m("CommitGetCursor", &["flags"]),
    m("GetColumnIndex", &["pLabel", "flags"]),
    m("GetColumnLabel", &["nCol", "flags"]),
    m("GetShared", &["nRow"]),
    m("SetShared", &["Value"]),
    m("Execute", &["pszCommand"]),
    m("Request", &["pszCommand"]),
    m("SeekRow", &["bkOrigin", "nRows"]),
    m("SetActiveDate", &["sDate", "flags"]),
    m("SetFilter", &["pFilter", "flags"]),
    m("SetLogic", &["pLogic", "flags"]),
    m("SetSort", &["pSort", "flags"]),
    m("MLValidate", &["pszRequiredVersion"]),
    m("DeleteRow", &["nRow", "flags"]),
    m("GetRowID", &["nRow", "flags"]),
    m("GetRowTimeStamp", &["nRow", "flags"]),
    m("Clear", &[]),
    m("ClearAll", &[]),
    m("FieldValue", &["FieldName"]),
    m("RestoreFilter", &[]),
    m("Abort", &[]),
    m("Cancel", &[]),
    m("Control", &["ControlName"]),
    m("Field", &["FieldName"]),
    m("MoveToField", &["FieldName"]),
    m("MoveToTab", &["TabName"]),
    m("Save", &[]),
    m("SetValue", &["Value"]),
    m("myfunction", &["x", "y"]),
    m("Test", &[]),
    m("Application", &[]),
    m("GetTest", &["bstrVal"]),
    m("GoToURL", &[]),
    m("HelloHTML", &[]),
    m("OnClick", &["ControlID"]),
    m("clickIn", &["x", "y"]),
    m("close", &[]),
    m("OnLoad", &[]),
    m("OnSave", &[]),
    m("OnCancel", &[]),
    m("OnEnterTab", &["Tab"]),
    m("OnLeaveTab", &["Tab"]),
    m("OnEnterField", &["Field"]),
    m("OnLeaveField", &["Field"]),
    m("OnEnterControl", &["ControlID"]),
    m("OnLeaveControl", &["ControlID"]),
    m("OnChange", &["ControlID"]),
    m("OnKeyPress", &["ControlID", "KeyAscii"]),
    m("OnActiveXControlEvent", &["ControlName", "EventName", "ParameterArr"]),
];

lazy_static::lazy_static! {
    static ref BY_NAME: HashMap<&'static str, &'static ApiMethod> =
        METHODS.iter().map(|method| (method.name, method)).collect();
}

/// Look up one method by its exact automation name.
pub fn method(name: &str) -> Option<&'static ApiMethod> {
    BY_NAME.get(name).copied()
}

/// JSON rendering of the whole surface, for documentation dumps.
pub fn to_json() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(METHODS)
}
