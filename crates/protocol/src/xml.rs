//! Minimaler XML-Elementbaum
//!
//! Die Requests des Clients sind kleine XML-Dokumente. Der Decoder braucht
//! nur Wurzel-Attribute und Kind-Elemente nach exaktem Tag-Namen, daher
//! wird das Dokument einmal mit quick-xml in einen Baum gelesen.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use voicegate_core::{GatewayError, Result};

/// Ein XML-Element mit Attributen, Text und Kindern
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attribute: Vec<(String, String)>,
    pub text: String,
    pub kinder: Vec<Element>,
}

impl Element {
    /// Parst ein Dokument und gibt das Wurzelelement zurueck
    pub fn parsen(eingabe: &str) -> Result<Element> {
        let mut reader = Reader::from_str(eingabe);
        reader.config_mut().trim_text(true);

        let mut stapel: Vec<Element> = Vec::new();
        let mut wurzel: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stapel.push(Self::aus_start(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = Self::aus_start(e)?;
                    anhaengen(&mut stapel, &mut wurzel, element);
                }
                Ok(Event::End(_)) => {
                    let element = stapel.pop().ok_or_else(|| {
                        GatewayError::UngueltigesXml("End-Tag ohne Start-Tag".into())
                    })?;
                    anhaengen(&mut stapel, &mut wurzel, element);
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| GatewayError::UngueltigesXml(e.to_string()))?;
                    if let Some(aktuell) = stapel.last_mut() {
                        aktuell.text.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(aktuell) = stapel.last_mut() {
                        aktuell.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(GatewayError::UngueltigesXml(e.to_string())),
            }
        }

        if let Some(offen) = stapel.last() {
            return Err(GatewayError::UngueltigesXml(format!(
                "Element nicht geschlossen: {}",
                offen.name
            )));
        }

        wurzel.ok_or_else(|| GatewayError::UngueltigesXml("Kein Wurzelelement".into()))
    }

    fn aus_start(start: &BytesStart<'_>) -> Result<Element> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attribute = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| GatewayError::UngueltigesXml(e.to_string()))?;
            let schluessel = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let wert = attr
                .unescape_value()
                .map_err(|e| GatewayError::UngueltigesXml(e.to_string()))?
                .into_owned();
            attribute.push((schluessel, wert));
        }
        Ok(Element {
            name,
            attribute,
            text: String::new(),
            kinder: Vec::new(),
        })
    }

    /// Wert eines Attributs nach exaktem Namen
    pub fn attribut(&self, name: &str) -> Option<&str> {
        self.attribute
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Erstes Kind-Element mit exaktem Tag-Namen
    pub fn kind(&self, name: &str) -> Option<&Element> {
        self.kinder.iter().find(|k| k.name == name)
    }

    /// Text des ersten Kind-Elements mit exaktem Tag-Namen
    ///
    /// Ein leeres Element gilt als vorhanden (leerer Text).
    pub fn kind_text(&self, name: &str) -> Option<&str> {
        self.kind(name).map(|k| k.text.as_str())
    }
}

fn anhaengen(stapel: &mut [Element], wurzel: &mut Option<Element>, element: Element) {
    match stapel.last_mut() {
        Some(eltern) => eltern.kinder.push(element),
        None => {
            // Weitere Top-Level-Elemente nach der Wurzel werden ignoriert
            if wurzel.is_none() {
                *wurzel = Some(element);
            }
        }
    }
}

/// Maskiert einen Textwert fuer die Ausgabe
pub fn maskieren(wert: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(wert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wurzel_attribute_und_kinder() {
        let doc = r#"<Request requestId="7" action="Account.Login.1">
            <ConnectorHandle>vgc-0001</ConnectorHandle>
            <AccountName>alice</AccountName>
        </Request>"#;
        let wurzel = Element::parsen(doc).unwrap();
        assert_eq!(wurzel.name, "Request");
        assert_eq!(wurzel.attribut("requestId"), Some("7"));
        assert_eq!(wurzel.attribut("action"), Some("Account.Login.1"));
        assert_eq!(wurzel.kind_text("AccountName"), Some("alice"));
        assert_eq!(wurzel.kind_text("AccountPassword"), None);
    }

    #[test]
    fn leeres_element_ist_vorhanden() {
        let wurzel = Element::parsen(r#"<Request><Name/><URI></URI></Request>"#).unwrap();
        assert_eq!(wurzel.kind_text("Name"), Some(""));
        assert_eq!(wurzel.kind_text("URI"), Some(""));
    }

    #[test]
    fn entities_werden_dekodiert() {
        let wurzel = Element::parsen(r#"<R a="x&amp;y"><T>1 &lt; 2</T></R>"#).unwrap();
        assert_eq!(wurzel.attribut("a"), Some("x&y"));
        assert_eq!(wurzel.kind_text("T"), Some("1 < 2"));
    }

    #[test]
    fn verschachtelte_elemente() {
        let wurzel = Element::parsen(
            r#"<R><SpeakerPosition><Position X="1" Y="2" Z="3"/></SpeakerPosition></R>"#,
        )
        .unwrap();
        let pos = wurzel.kind("SpeakerPosition").and_then(|s| s.kind("Position")).unwrap();
        assert_eq!(pos.attribut("Y"), Some("2"));
    }

    #[test]
    fn kaputtes_xml_gibt_fehler() {
        assert!(matches!(
            Element::parsen("<Request><A></B></Request>"),
            Err(GatewayError::UngueltigesXml(_))
        ));
        assert!(matches!(
            Element::parsen("<Request><A>"),
            Err(GatewayError::UngueltigesXml(_))
        ));
        assert!(matches!(Element::parsen(""), Err(GatewayError::UngueltigesXml(_))));
    }

    #[test]
    fn maskieren_ersetzt_sonderzeichen() {
        assert_eq!(maskieren("a<b&c"), "a&lt;b&amp;c");
        assert_eq!(maskieren("normal"), "normal");
    }
}
