//! Document marshaller: resource tree → markup
//!
//! What to write for each resource comes from the attribute declarations of
//! its type: markup attributes on the start tag, then one child element per
//! defined leaf in declaration order, then nested resources. Undefined
//! attributes are omitted; a defined but empty property list is written as
//! an empty `properties` element.

use std::time::Instant;

use foxconf_core_types::schema::FIELD_RESOURCE_COUNT;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::{Result, SubsystemError};
use crate::model::{PropertyList, Value};
use crate::ops::{Resource, ResourceTree};
use crate::vocabulary::{Attribute, Element, Namespace};
use crate::{log_op_end, log_op_error, log_op_start};

const INDENT: usize = 4;

/// Write a resource tree as a subsystem document
///
/// The document always contains a `process-engines` element, empty when the
/// tree holds no engines. The job executor follows when present.
///
/// # Errors
///
/// Returns `Serialization` if the markup writer fails.
///
/// # Example
///
/// ```
/// use foxconf_core::{install, marshal};
///
/// let tree = install("<process-engines/>").unwrap();
/// let document = marshal(&tree).unwrap();
/// assert!(document.contains("<process-engines/>"));
/// ```
pub fn marshal(tree: &ResourceTree) -> Result<String> {
    log_op_start!("marshal", { FIELD_RESOURCE_COUNT } = tree.len());
    let start = Instant::now();

    let document = marshal_impl(tree).map_err(|err| {
        log_op_error!(
            "marshal",
            err,
            duration_ms = start.elapsed().as_millis() as u64
        );
        err
    })?;

    log_op_end!(
        "marshal",
        duration_ms = start.elapsed().as_millis() as u64,
        output_len = document.len()
    );
    Ok(document)
}

fn marshal_impl(tree: &ResourceTree) -> Result<String> {
    let mut writer = DocumentWriter::new();

    let mut root = BytesStart::new(Element::Subsystem.local_name());
    root.push_attribute(("xmlns", Namespace::CURRENT.uri()));
    writer.start(root)?;

    let engines = tree.process_engines();
    let engines_tag = Element::ProcessEngines.local_name();
    if engines.is_empty() {
        writer.empty(BytesStart::new(engines_tag))?;
    } else {
        writer.start(BytesStart::new(engines_tag))?;
        for (_, engine) in engines {
            write_resource(&mut writer, engine, &[])?;
        }
        writer.end(engines_tag)?;
    }

    if let Some(executor) = tree.job_executor() {
        let acquisitions: Vec<&Resource> = tree
            .job_acquisitions()
            .into_iter()
            .map(|(_, resource)| resource)
            .collect();
        write_resource(&mut writer, executor, &acquisitions)?;
    }

    writer.end(Element::Subsystem.local_name())?;
    writer.finish()
}

fn write_resource(
    writer: &mut DocumentWriter,
    resource: &Resource,
    nested: &[&Resource],
) -> Result<()> {
    let resource_type = resource.resource_type();
    let tag_name = resource_type.element().local_name();
    let mut tag = BytesStart::new(tag_name);
    let mut leaves: Vec<(Attribute, &Value)> = Vec::new();

    for definition in resource_type.attributes() {
        let Some(value) = resource
            .attributes()
            .get(definition.attribute)
            .filter(|v| v.is_defined())
        else {
            continue;
        };
        if definition.attribute.is_markup() {
            let text = scalar_text(value);
            tag.push_attribute((definition.attribute.local_name(), text.as_str()));
        } else {
            leaves.push((definition.attribute, value));
        }
    }

    if leaves.is_empty() && nested.is_empty() {
        return writer.empty(tag);
    }

    writer.start(tag)?;
    for (attribute, value) in leaves {
        let name = attribute.local_name();
        match value {
            Value::Properties(properties) => write_properties(writer, name, properties)?,
            other => writer.text_element(BytesStart::new(name), &scalar_text(other))?,
        }
    }
    for child in nested {
        write_resource(writer, child, &[])?;
    }
    writer.end(tag_name)
}

fn write_properties(writer: &mut DocumentWriter, name: &str, properties: &PropertyList) -> Result<()> {
    if properties.is_empty() {
        return writer.empty(BytesStart::new(name));
    }
    writer.start(BytesStart::new(name))?;
    for (key, value) in properties.iter() {
        let mut tag = BytesStart::new(Element::Property.local_name());
        tag.push_attribute((Attribute::Name.local_name(), key));
        writer.text_element(tag, value)?;
    }
    writer.end(name)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Boolean(b) => b.to_string(),
        other => other.as_str().unwrap_or_default().to_string(),
    }
}

/// Indenting markup writer over an in-memory buffer
struct DocumentWriter {
    writer: Writer<Vec<u8>>,
}

impl DocumentWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT),
        }
    }

    fn start(&mut self, tag: BytesStart<'_>) -> Result<()> {
        self.write(Event::Start(tag))
    }

    fn empty(&mut self, tag: BytesStart<'_>) -> Result<()> {
        self.write(Event::Empty(tag))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<tag>text</tag>` on one line
    fn text_element(&mut self, tag: BytesStart<'_>, text: &str) -> Result<()> {
        let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
        self.start(tag)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(&name)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|err| SubsystemError::Serialization {
                message: err.to_string(),
            })
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|err| SubsystemError::Serialization {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::install;

    const NS: &str = "urn:com.camunda.fox.fox-platform:1.1";

    #[test]
    fn test_empty_tree_writes_empty_engines() {
        let tree = install("<process-engines/>").unwrap();
        let document = marshal(&tree).unwrap();
        assert_eq!(
            document,
            format!("<subsystem xmlns=\"{NS}\">\n    <process-engines/>\n</subsystem>")
        );
    }

    #[test]
    fn test_engine_layout() {
        let tree = install(
            "<process-engine name=\"e\" default=\"true\">\
               <properties><property name=\"a\">1</property></properties>\
               <datasource>java:ds</datasource>\
             </process-engine>",
        )
        .unwrap();
        let document = marshal(&tree).unwrap();
        let expected = [
            format!("<subsystem xmlns=\"{NS}\">"),
            "    <process-engines>".to_string(),
            "        <process-engine name=\"e\" default=\"true\">".to_string(),
            "            <datasource>java:ds</datasource>".to_string(),
            "            <properties>".to_string(),
            "                <property name=\"a\">1</property>".to_string(),
            "            </properties>".to_string(),
            "        </process-engine>".to_string(),
            "    </process-engines>".to_string(),
            "</subsystem>".to_string(),
        ]
        .join("\n");
        assert_eq!(document, expected);
    }

    #[test]
    fn test_defined_empty_properties_written() {
        let tree = install("<process-engine name=\"e\"><properties/></process-engine>").unwrap();
        let document = marshal(&tree).unwrap();
        assert!(document.contains("<properties/>"));

        let tree = install("<process-engine name=\"e\"/>").unwrap();
        let document = marshal(&tree).unwrap();
        assert!(!document.contains("properties"));
        assert!(document.contains("<process-engine name=\"e\"/>"));
    }

    #[test]
    fn test_job_executor_after_engines() {
        let tree = install(&format!(
            "<subsystem xmlns=\"{NS}\">\
               <job-executor>\
                 <thread-pool-name>tp</thread-pool-name>\
                 <job-acquisition name=\"a\"><acquisition-strategy>SEQUENTIAL</acquisition-strategy></job-acquisition>\
               </job-executor>\
             </subsystem>"
        ))
        .unwrap();
        let document = marshal(&tree).unwrap();
        let engines = document.find("<process-engines/>").unwrap();
        let executor = document.find("<job-executor>").unwrap();
        let pool = document.find("<thread-pool-name>tp</thread-pool-name>").unwrap();
        let acquisition = document.find("<job-acquisition name=\"a\">").unwrap();
        assert!(engines < executor && executor < pool && pool < acquisition);
        assert!(document.contains("<acquisition-strategy>SEQUENTIAL</acquisition-strategy>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let tree = install(
            "<process-engine name=\"a&amp;b\"><configuration>x &lt; y</configuration></process-engine>",
        )
        .unwrap();
        let document = marshal(&tree).unwrap();
        assert!(document.contains("name=\"a&amp;b\""));
        assert!(document.contains("<configuration>x &lt; y</configuration>"));
    }
}
