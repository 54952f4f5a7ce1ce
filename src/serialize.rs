use serde_json::Value;

/// Two-way mapping between a typed entity and its JSON wire form.
///
/// Entities used with [`crate::RestService`] implement this together with
/// [`Default`]; the service materializes a fresh default instance for every
/// decoded element and populates it in place.
///
/// `deserialize` is deliberately best-effort: a key missing from the input
/// leaves the corresponding field untouched, and a wrongly-typed value is
/// skipped rather than reported. Strict validation belongs to the server.
pub trait Serializable {
    /// Produces the wire representation sent as a request body.
    fn serialize(&self) -> Value;

    /// Populates the receiver's fields from a decoded wire value.
    ///
    /// Implementations must tolerate missing keys.
    fn deserialize(&mut self, input: &Value);
}
