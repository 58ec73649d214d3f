//! Befehle auf den Zustandsspeicher anwenden
//!
//! Jeder Befehl veraendert hoechstens einen Datensatz. Befehle ohne
//! Zustandswirkung sind No-ops. Fehler beim Geraetewechsel werden nur
//! geloggt.

use crate::bridge::{CallBridge, GeraeteArt};
use crate::state::ZustandsSpeicher;
use voicegate_core::ACCOUNT_HANDLE;
use voicegate_protocol::command::{als_bool, als_f32};
use voicegate_protocol::{Befehl, ProtokollKonfig};

/// Wendet einen Befehl auf den Speicher an
pub fn anwenden(
    befehl: &Befehl,
    speicher: &mut ZustandsSpeicher,
    bridge: &mut dyn CallBridge,
    konfig: &ProtokollKonfig,
) {
    match befehl {
        Befehl::AccountLogin(login) => {
            let account = &mut speicher.account;
            account.name = login.account_name.clone();
            account.passwort = login.account_password.clone();
            account.uri = login.account_uri.clone();
            account.handle = ACCOUNT_HANDLE.to_string();
            tracing::info!(account = %account.name, uri = %account.uri, "Account angemeldet");
        }
        Befehl::AccountLogout { account_handle } => {
            tracing::info!(handle = %account_handle, "Account abgemeldet");
            speicher.account = Default::default();
        }

        Befehl::ConnectorCreate(create) => {
            speicher.connector.voice_server_url = if konfig.voice_server_uri.is_empty() {
                format!("{}voiceinfo/", create.account_management_server)
            } else {
                konfig.voice_server_uri.clone()
            };
            tracing::info!(
                url = %speicher.connector.voice_server_url,
                "Voice-Server-URL gesetzt"
            );
        }

        Befehl::ConnectorMuteLocalMic(w) => {
            stumm_setzen(&mut speicher.audio.mikrofon_stumm, &w.wert, "mikrofon");
        }
        Befehl::ConnectorMuteLocalSpeaker(w) => {
            stumm_setzen(&mut speicher.audio.lautsprecher_stumm, &w.wert, "lautsprecher");
        }
        Befehl::ConnectorSetLocalMicVolume(w) => {
            let wert = als_f32(&w.wert);
            speicher.audio.mikrofon_lautstaerke = wert;
            speicher.connector.audio.mikrofon_lautstaerke = wert;
            tracing::info!(lautstaerke = wert, "Mikrofon-Lautstaerke gesetzt");
        }
        Befehl::ConnectorSetLocalSpeakerVolume(w) => {
            let wert = als_f32(&w.wert);
            speicher.audio.lautsprecher_lautstaerke = wert;
            speicher.connector.audio.lautsprecher_lautstaerke = wert;
            tracing::info!(lautstaerke = wert, "Lautsprecher-Lautstaerke gesetzt");
        }
        Befehl::AuxSetCaptureDevice { geraet } => {
            geraet_wechseln(
                GeraeteArt::Aufnahme,
                geraet,
                &mut speicher.audio.aufnahme_geraet,
                bridge,
            );
        }
        Befehl::AuxSetRenderDevice { geraet } => {
            geraet_wechseln(
                GeraeteArt::Wiedergabe,
                geraet,
                &mut speicher.audio.wiedergabe_geraet,
                bridge,
            );
        }

        Befehl::SessionCreate(create) => {
            let session = &mut speicher.session;
            session.name = create.name.clone().unwrap_or_default();
            session.passwort = create.passwort.clone().unwrap_or_default();
            session.uri = create.uri.clone();
            session.verbindungs_typ = create.verbindungs_typ.clone().unwrap_or_default();
            tracing::debug!(
                uri = %session.uri,
                typ = %session.verbindungs_typ,
                "Session-Daten uebernommen"
            );
        }
        Befehl::SessionSet3DPosition(pos) => {
            speicher.orientierung.sprecher = pos.sprecher;
            speicher.orientierung.zuhoerer = pos.zuhoerer;
            tracing::trace!(
                sprecher = %pos.sprecher.position,
                zuhoerer = %pos.zuhoerer.position,
                "Position aktualisiert"
            );
        }

        _ => {}
    }
}

fn stumm_setzen(ziel: &mut bool, wert: &str, richtung: &'static str) {
    match als_bool(wert) {
        Some(stumm) => {
            *ziel = stumm;
            tracing::debug!(richtung, stumm, "Stummschaltung gesetzt");
        }
        None => {
            tracing::warn!(richtung, wert = %wert, "Ungueltiger Mute-Wert, Zustand unveraendert");
        }
    }
}

/// Wechselt das Geraet nur bei Aenderung des Namens
fn geraet_wechseln(art: GeraeteArt, name: &str, aktuell: &mut String, bridge: &mut dyn CallBridge) {
    if aktuell.as_str() == name {
        tracing::debug!(art = %art, geraet = %name, "Geraet unveraendert");
        return;
    }
    *aktuell = name.to_string();

    if !bridge.audio_geraete(art).iter().any(|g| g == name) {
        tracing::warn!(art = %art, geraet = %name, "Ungueltiges oder unbekanntes Audiogeraet");
        return;
    }

    match bridge.audio_geraet_setzen(art, name) {
        Ok(()) => tracing::debug!(art = %art, geraet = %name, "Audiogeraet gesetzt"),
        Err(e) => tracing::warn!(art = %art, geraet = %name, fehler = %e, "Audiogeraet konnte nicht gesetzt werden"),
    }
}
