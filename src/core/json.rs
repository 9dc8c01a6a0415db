use crate::core::resource::{with_resource_stream, ResourceLoader};
use crate::utils::error::Result;
use crate::utils::validation::{ensure_valid, Constrained};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::io::{self, Read, Write};
use std::sync::LazyLock;

/// The shared JSON codec. Reachable only through [`with_codec`] and friends.
pub struct JsonCodec {
    indent: &'static str,
}

impl JsonCodec {
    fn new() -> Self {
        Self { indent: "  " }
    }

    pub fn read_tree(&self, reader: impl Read) -> Result<Value> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn read_value<T: DeserializeOwned>(&self, reader: impl Read) -> Result<T> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    pub fn pretty(&self) -> PrettyPrinter {
        PrettyPrinter {
            indent: self.indent,
        }
    }
}

/// A formatting view of the codec configured for indented output.
pub struct PrettyPrinter {
    indent: &'static str,
}

impl PrettyPrinter {
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf).expect("serializer emits UTF-8"))
    }
}

static CODEC: LazyLock<JsonCodec> = LazyLock::new(JsonCodec::new);

pub fn with_codec<R>(operation: impl FnOnce(&JsonCodec) -> R) -> R {
    operation(&CODEC)
}

pub fn with_codec_and<U, R>(
    supplier: impl FnOnce() -> U,
    operation: impl FnOnce(&JsonCodec, U) -> R,
) -> R {
    with_codec(|codec| operation(codec, supplier()))
}

pub fn use_codec(operation: impl FnOnce(&JsonCodec)) {
    with_codec(|codec| operation(codec));
}

pub fn use_codec_and<U>(supplier: impl FnOnce() -> U, operation: impl FnOnce(&JsonCodec, U)) {
    use_codec(|codec| operation(codec, supplier()));
}

pub fn with_pretty_printer<R>(operation: impl FnOnce(PrettyPrinter) -> R) -> R {
    with_codec(|codec| operation(codec.pretty()))
}

pub fn use_pretty_printer(operation: impl FnOnce(PrettyPrinter)) {
    with_pretty_printer(|printer| operation(printer));
}

/// Decodes the named resource into a generic JSON tree.
pub fn read_tree(loader: Option<&dyn ResourceLoader>, name: &str) -> Result<Value> {
    with_resource_stream(loader, name, |stream| {
        with_codec(|codec| codec.read_tree(stream))
    })?
}

/// Decodes the named resource into `T`.
pub fn read_value<T: DeserializeOwned>(loader: Option<&dyn ResourceLoader>, name: &str) -> Result<T> {
    with_resource_stream(loader, name, |stream| {
        with_codec(|codec| codec.read_value(stream))
    })?
}

/// Decodes the named resource into `T` and runs it through the validation
/// gate before returning.
pub fn read_valid_value<T>(loader: Option<&dyn ResourceLoader>, name: &str) -> Result<T>
where
    T: DeserializeOwned + Constrained,
{
    read_value(loader, name).and_then(ensure_valid)
}

pub fn pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    with_pretty_printer(|printer| printer.render(value))
}

/// Writes the indented rendering of `value` to `sink`, followed by a line
/// break.
pub fn write_pretty<T: Serialize + ?Sized>(value: &T, sink: &mut dyn Write) -> Result<()> {
    let rendered = pretty_string(value)?;
    writeln!(sink, "{rendered}")?;
    Ok(())
}

pub fn print_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_pretty(value, &mut io::stdout())
}
