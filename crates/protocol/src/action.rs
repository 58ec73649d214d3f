//! Aktions-Klassifizierung
//!
//! Ein Aktions-String wie `Session.Create.1` wird ueber die Familie vor dem
//! ersten Punkt und anschliessend ueber ein Verb im Rest einer Variante
//! zugeordnet. Die Verben werden in fester Reihenfolge geprueft, der erste
//! Treffer gewinnt.

use voicegate_core::GatewayError;

/// Alle bekannten Protokoll-Aktionen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AktionsTyp {
    // Aux
    AuxCaptureAudioStart,
    AuxCaptureAudioStop,
    AuxGetCaptureDevices,
    AuxGetRenderDevices,
    AuxSetCaptureDevice,
    AuxSetRenderDevice,
    AuxSetMicLevel,
    AuxSetSpeakerLevel,
    // Account
    AccountLogin,
    AccountLogout,
    AccountBlockListRules,
    AccountListAutoAcceptRules,
    // Connector
    ConnectorCreate,
    ConnectorInitiateShutdown,
    ConnectorMuteLocalMic,
    ConnectorMuteLocalSpeaker,
    ConnectorSetLocalMicVolume,
    ConnectorSetLocalSpeakerVolume,
    // Session
    SessionCreate,
    SessionTerminate,
    SessionConnect,
    SessionSet3DPosition,
    SessionSetParticipantMuteForMe,
    SessionSetParticipantVolumeForMe,
    SessionMediaDisconnect,
    SessionRenderAudioStart,
    SessionRenderAudioStop,
}

const AUX_VERBEN: &[(&str, AktionsTyp)] = &[
    ("CaptureAudioStart", AktionsTyp::AuxCaptureAudioStart),
    ("CaptureAudioStop", AktionsTyp::AuxCaptureAudioStop),
    ("GetCaptureDevices", AktionsTyp::AuxGetCaptureDevices),
    ("GetRenderDevices", AktionsTyp::AuxGetRenderDevices),
    ("SetCaptureDevice", AktionsTyp::AuxSetCaptureDevice),
    ("SetRenderDevice", AktionsTyp::AuxSetRenderDevice),
    ("SetMicLevel", AktionsTyp::AuxSetMicLevel),
    ("SetSpeakerLevel", AktionsTyp::AuxSetSpeakerLevel),
];

const ACCOUNT_VERBEN: &[(&str, AktionsTyp)] = &[
    ("Login", AktionsTyp::AccountLogin),
    ("Logout", AktionsTyp::AccountLogout),
    ("Block", AktionsTyp::AccountBlockListRules),
    ("AutoAccept", AktionsTyp::AccountListAutoAcceptRules),
];

const CONNECTOR_VERBEN: &[(&str, AktionsTyp)] = &[
    ("Create", AktionsTyp::ConnectorCreate),
    ("InitiateShutdown", AktionsTyp::ConnectorInitiateShutdown),
    ("MuteLocalMic", AktionsTyp::ConnectorMuteLocalMic),
    ("MuteLocalSpeaker", AktionsTyp::ConnectorMuteLocalSpeaker),
    ("SetLocalMicVolume", AktionsTyp::ConnectorSetLocalMicVolume),
    ("SetLocalSpeakerVolume", AktionsTyp::ConnectorSetLocalSpeakerVolume),
];

// "Create" vor "Terminate" vor "Connect"
const SESSION_VERBEN: &[(&str, AktionsTyp)] = &[
    ("Create", AktionsTyp::SessionCreate),
    ("Terminate", AktionsTyp::SessionTerminate),
    ("Connect", AktionsTyp::SessionConnect),
    ("Set3DPosition", AktionsTyp::SessionSet3DPosition),
    ("SetParticipantMuteForMe", AktionsTyp::SessionSetParticipantMuteForMe),
    ("SetParticipantVolumeForMe", AktionsTyp::SessionSetParticipantVolumeForMe),
    ("MediaDisconnect", AktionsTyp::SessionMediaDisconnect),
    ("RenderAudioStart", AktionsTyp::SessionRenderAudioStart),
    ("RenderAudioStop", AktionsTyp::SessionRenderAudioStop),
];

impl AktionsTyp {
    /// Alle Varianten in Protokoll-Reihenfolge
    pub const ALLE: [AktionsTyp; 27] = [
        Self::AuxCaptureAudioStart,
        Self::AuxCaptureAudioStop,
        Self::AuxGetCaptureDevices,
        Self::AuxGetRenderDevices,
        Self::AuxSetCaptureDevice,
        Self::AuxSetRenderDevice,
        Self::AuxSetMicLevel,
        Self::AuxSetSpeakerLevel,
        Self::AccountLogin,
        Self::AccountLogout,
        Self::AccountBlockListRules,
        Self::AccountListAutoAcceptRules,
        Self::ConnectorCreate,
        Self::ConnectorInitiateShutdown,
        Self::ConnectorMuteLocalMic,
        Self::ConnectorMuteLocalSpeaker,
        Self::ConnectorSetLocalMicVolume,
        Self::ConnectorSetLocalSpeakerVolume,
        Self::SessionCreate,
        Self::SessionTerminate,
        Self::SessionConnect,
        Self::SessionSet3DPosition,
        Self::SessionSetParticipantMuteForMe,
        Self::SessionSetParticipantVolumeForMe,
        Self::SessionMediaDisconnect,
        Self::SessionRenderAudioStart,
        Self::SessionRenderAudioStop,
    ];

    /// Ordnet einen rohen Aktions-String einer Variante zu
    ///
    /// Die Familie muss exakt dem Segment vor dem ersten `.` entsprechen,
    /// das Verb wird nur im Teil danach gesucht (gross/klein-sensitiv).
    pub fn klassifizieren(aktion: &str) -> Result<AktionsTyp, GatewayError> {
        let unbekannt = || GatewayError::UnbekannteAktion(aktion.to_string());

        let (familie, rest) = aktion.split_once('.').ok_or_else(unbekannt)?;
        let verben = match familie {
            "Aux" => AUX_VERBEN,
            "Account" => ACCOUNT_VERBEN,
            "Connector" => CONNECTOR_VERBEN,
            "Session" => SESSION_VERBEN,
            _ => return Err(unbekannt()),
        };

        verben
            .iter()
            .find(|(verb, _)| rest.contains(verb))
            .map(|(_, typ)| *typ)
            .ok_or_else(unbekannt)
    }

    /// Kanonischer Aktionsname mit `.1`-Suffix
    pub fn kanonischer_name(self) -> &'static str {
        match self {
            Self::AuxCaptureAudioStart => "Aux.CaptureAudioStart.1",
            Self::AuxCaptureAudioStop => "Aux.CaptureAudioStop.1",
            Self::AuxGetCaptureDevices => "Aux.GetCaptureDevices.1",
            Self::AuxGetRenderDevices => "Aux.GetRenderDevices.1",
            Self::AuxSetCaptureDevice => "Aux.SetCaptureDevice.1",
            Self::AuxSetRenderDevice => "Aux.SetRenderDevice.1",
            Self::AuxSetMicLevel => "Aux.SetMicLevel.1",
            Self::AuxSetSpeakerLevel => "Aux.SetSpeakerLevel.1",
            Self::AccountLogin => "Account.Login.1",
            Self::AccountLogout => "Account.Logout.1",
            Self::AccountBlockListRules => "Account.BlockListRules.1",
            Self::AccountListAutoAcceptRules => "Account.ListAutoAcceptRules.1",
            Self::ConnectorCreate => "Connector.Create.1",
            Self::ConnectorInitiateShutdown => "Connector.InitiateShutdown.1",
            Self::ConnectorMuteLocalMic => "Connector.MuteLocalMic.1",
            Self::ConnectorMuteLocalSpeaker => "Connector.MuteLocalSpeaker.1",
            Self::ConnectorSetLocalMicVolume => "Connector.SetLocalMicVolume.1",
            Self::ConnectorSetLocalSpeakerVolume => "Connector.SetLocalSpeakerVolume.1",
            Self::SessionCreate => "Session.Create.1",
            Self::SessionTerminate => "Session.Terminate.1",
            Self::SessionConnect => "Session.Connect.1",
            Self::SessionSet3DPosition => "Session.Set3DPosition.1",
            Self::SessionSetParticipantMuteForMe => "Session.SetParticipantMuteForMe.1",
            Self::SessionSetParticipantVolumeForMe => "Session.SetParticipantVolumeForMe.1",
            Self::SessionMediaDisconnect => "Session.MediaDisconnect.1",
            Self::SessionRenderAudioStart => "Session.RenderAudioStart.1",
            Self::SessionRenderAudioStop => "Session.RenderAudioStop.1",
        }
    }

    /// Gibt true zurueck fuer Aktionen der Audio-Region des Connectors
    pub fn ist_audio(self) -> bool {
        matches!(
            self,
            Self::ConnectorMuteLocalMic
                | Self::ConnectorMuteLocalSpeaker
                | Self::ConnectorSetLocalMicVolume
                | Self::ConnectorSetLocalSpeakerVolume
                | Self::AuxSetCaptureDevice
                | Self::AuxSetRenderDevice
        )
    }
}

impl std::fmt::Display for AktionsTyp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kanonischer_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kanonische_namen_klassifizieren_zu_sich_selbst() {
        for typ in AktionsTyp::ALLE {
            assert_eq!(
                AktionsTyp::klassifizieren(typ.kanonischer_name()).unwrap(),
                typ,
                "{typ}"
            );
        }
    }

    #[test]
    fn kurze_verben_der_v122_aktionen() {
        assert_eq!(
            AktionsTyp::klassifizieren("Account.BlockListRules.1").unwrap(),
            AktionsTyp::AccountBlockListRules
        );
        assert_eq!(
            AktionsTyp::klassifizieren("Account.ListAutoAcceptRules.1").unwrap(),
            AktionsTyp::AccountListAutoAcceptRules
        );
    }

    #[test]
    fn session_reihenfolge_create_vor_connect() {
        assert_eq!(
            AktionsTyp::klassifizieren("Session.Connect.1").unwrap(),
            AktionsTyp::SessionConnect
        );
        // "MediaDisconnect" enthaelt kein "Connect" (klein geschrieben)
        assert_eq!(
            AktionsTyp::klassifizieren("Session.MediaDisconnect.1").unwrap(),
            AktionsTyp::SessionMediaDisconnect
        );
    }

    #[test]
    fn familie_muss_vor_dem_punkt_stehen() {
        assert!(matches!(
            AktionsTyp::klassifizieren("Foo.Session.Create.1"),
            Err(GatewayError::UnbekannteAktion(_))
        ));
        // Verb in der Familie selbst zaehlt nicht
        assert!(AktionsTyp::klassifizieren("Session").is_err());
        assert!(AktionsTyp::klassifizieren("SessionCreate.1").is_err());
    }

    #[test]
    fn unbekannte_aktion_nennt_rohstring() {
        let fehler = AktionsTyp::klassifizieren("Aux.Explode.1").unwrap_err();
        match fehler {
            GatewayError::UnbekannteAktion(roh) => assert_eq!(roh, "Aux.Explode.1"),
            andere => panic!("falscher Fehler: {andere:?}"),
        }
    }

    #[test]
    fn gross_kleinschreibung_zaehlt() {
        assert!(AktionsTyp::klassifizieren("session.create.1").is_err());
        assert!(AktionsTyp::klassifizieren("Session.create.1").is_err());
    }

    #[test]
    fn audio_aktionen() {
        assert!(AktionsTyp::AuxSetRenderDevice.ist_audio());
        assert!(AktionsTyp::ConnectorSetLocalMicVolume.ist_audio());
        assert!(!AktionsTyp::AuxSetMicLevel.ist_audio());
        assert!(!AktionsTyp::SessionSet3DPosition.ist_audio());
    }
}
