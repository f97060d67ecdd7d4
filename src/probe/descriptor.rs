use crate::args::HttpMethod;

/// One HTTP call to make: method, endpoint path, optional raw body.
#[derive(Debug, Clone)]
pub struct ProbeDescriptor {
    pub method: HttpMethod,
    pub endpoint: String,
    pub body: Option<String>,
}

impl ProbeDescriptor {
    #[must_use]
    pub fn get(endpoint: &str) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.to_owned(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(endpoint: &str, body: &str) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint: endpoint.to_owned(),
            body: Some(body.to_owned()),
        }
    }
}

/// The sweep played when no plan file and no one-off flags are given.
///
/// Vehicles 1234 and 1235 exist in the upstream fixtures, 1236 does not.
/// 1234 is a combustion car, so its battery level comes back null, and the
/// engine endpoint accepts START/STOP and rejects anything else. Several
/// probes are expected to fail at the application level; the point is to
/// observe the server's error shapes.
#[must_use]
pub fn default_plan() -> Vec<ProbeDescriptor> {
    vec![
        ProbeDescriptor::get("vehicles/1234"),
        ProbeDescriptor::get("vehicles/1235"),
        ProbeDescriptor::get("vehicles/1234/doors"),
        ProbeDescriptor::get("vehicles/1235/fuel"),
        ProbeDescriptor::get("vehicles/1234/battery"),
        ProbeDescriptor::get("vehicles/1236/battery"),
        ProbeDescriptor::post("vehicles/1234/engine", r#"{"action":"START"}"#),
        ProbeDescriptor::post("vehicles/1234/engine", r#"{"action":"FOOBAR"}"#),
    ]
}
