//! Template catalog - fixed per-kind phase blueprints.
//!
//! One canonical table per operation kind. Entries are the business
//! workflow steps used by the project officers, with nominal
//! durations in days and a display color per workflow stage.

use opstrack_core::OperationKind;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A template's definition of one phase, before dates are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseBlueprint {
    /// Phase name
    pub name: String,

    /// Nominal duration in days (positive)
    pub duration_days: u32,

    /// Display color token
    pub color: String,
}

impl PhaseBlueprint {
    /// Build a blueprint from owned or borrowed parts.
    pub fn new(name: impl Into<String>, duration_days: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_days,
            color: color.into(),
        }
    }

    /// Check the catalog invariants: non-empty name, positive duration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.name.trim().is_empty() {
            return Err(EngineError::Validation("blueprint name is empty".to_string()));
        }
        if self.duration_days == 0 {
            return Err(EngineError::Validation(format!(
                "blueprint '{}' has zero duration",
                self.name
            )));
        }
        Ok(())
    }
}

type Row = (&'static str, u32, &'static str);

// Own-account development, from land opportunity to delivery report.
const OPP: &[Row] = &[
    // Preliminary studies
    ("Étude d'Opportunité", 15, "#2ca02c"),
    ("Étude de Faisabilité", 30, "#2ca02c"),
    ("Programmation", 20, "#2ca02c"),
    // Financial and land setup
    ("Montage Financier", 45, "#1f77b4"),
    ("Acquisition Foncière", 60, "#1f77b4"),
    ("Études Géotechniques", 30, "#1f77b4"),
    // Building permit
    ("Dépôt Permis de Construire", 15, "#ff7f0e"),
    ("Instruction PC", 90, "#ff7f0e"),
    ("Obtention PC", 15, "#ff7f0e"),
    ("Purge Recours PC", 60, "#ff7f0e"),
    // Design missions
    ("Mission MOE - ESQ", 30, "#9467bd"),
    ("Mission MOE - AVP", 45, "#9467bd"),
    ("Mission MOE - PRO", 60, "#9467bd"),
    ("Mission MOE - ACT", 30, "#9467bd"),
    // Contractor consultation
    ("Préparation DCE", 30, "#d62728"),
    ("Consultation Entreprises", 45, "#d62728"),
    ("Analyse Offres", 15, "#d62728"),
    ("Attribution Marchés", 30, "#d62728"),
    ("Signature Marchés", 15, "#d62728"),
    // Site preparation
    ("Préparation Chantier", 30, "#8c564b"),
    ("Installation Chantier", 15, "#8c564b"),
    ("Réunion Lancement", 5, "#8c564b"),
    // Works
    ("Travaux VRD", 60, "#e377c2"),
    ("Travaux Terrassement", 30, "#e377c2"),
    ("Travaux Fondations", 45, "#e377c2"),
    ("Travaux Gros Œuvre", 120, "#e377c2"),
    ("Travaux Étanchéité", 30, "#e377c2"),
    ("Travaux Charpente", 45, "#e377c2"),
    ("Travaux Couverture", 30, "#e377c2"),
    ("Travaux Cloisons", 45, "#e377c2"),
    ("Travaux Électricité", 60, "#e377c2"),
    ("Travaux Plomberie", 60, "#e377c2"),
    ("Travaux Climatisation", 45, "#e377c2"),
    ("Travaux Revêtements", 60, "#e377c2"),
    ("Travaux Peinture", 45, "#e377c2"),
    ("Travaux Menuiseries", 30, "#e377c2"),
    // Utility connections
    ("Raccordement EDF", 45, "#7f7f7f"),
    ("Raccordement Eau", 30, "#7f7f7f"),
    ("Raccordement Fibre", 20, "#7f7f7f"),
    ("Raccordement Assainissement", 30, "#7f7f7f"),
    // Completion
    ("Nettoyage Final", 10, "#bcbd22"),
    ("Pré-réception", 15, "#bcbd22"),
    ("Levée Réserves", 30, "#bcbd22"),
    ("Réception Définitive", 15, "#bcbd22"),
    // Delivery
    ("Préparation Livraison", 15, "#17becf"),
    ("Livraison Logements", 30, "#17becf"),
    ("DGD", 30, "#17becf"),
    ("Bilan Opération", 15, "#17becf"),
];

// Off-plan purchase, driven by the developer's milestones.
const VEFA: &[Row] = &[
    ("Recherche Promoteurs", 30, "#2ca02c"),
    ("Analyse Projets", 45, "#2ca02c"),
    ("Sélection Promoteur", 30, "#2ca02c"),
    ("Due Diligence", 20, "#1f77b4"),
    ("Négociation Contrat", 30, "#1f77b4"),
    ("Validation Interne", 15, "#1f77b4"),
    ("Signature VEFA", 15, "#ff7f0e"),
    ("Appel Fonds 1", 5, "#ff7f0e"),
    ("Suivi Travaux Gros Œuvre", 180, "#d62728"),
    ("Appel Fonds 2", 5, "#d62728"),
    ("Suivi Second Œuvre", 120, "#d62728"),
    ("Appel Fonds 3", 5, "#d62728"),
    ("Suivi Finitions", 60, "#d62728"),
    ("Pré-réception", 15, "#9467bd"),
    ("Réserves", 30, "#9467bd"),
    ("Réception Définitive", 15, "#9467bd"),
    ("Appel Fonds Final", 5, "#8c564b"),
    ("Livraison", 30, "#8c564b"),
    ("DGD VEFA", 30, "#17becf"),
];

// Study mandate (14 steps).
const STUDY_MANDATE: &[Row] = &[
    ("Signature convention mandat", 7, "#2ca02c"),
    ("Définition besoins/programme", 20, "#2ca02c"),
    ("Diagnostic technique/urbain", 30, "#1f77b4"),
    ("Études de faisabilité", 45, "#1f77b4"),
    ("Lancement consultation programmiste", 15, "#ff7f0e"),
    ("Attribution/notification programmiste", 10, "#ff7f0e"),
    ("Lancement consultation MOE urbaine", 20, "#d62728"),
    ("Attribution/notification MOE urbaine", 15, "#d62728"),
    ("Démarrage études (OS)", 5, "#9467bd"),
    ("Concertation/validation intermédiaire", 30, "#9467bd"),
    ("Remise livrables intermédiaires", 15, "#8c564b"),
    ("Remise livrables finaux", 20, "#8c564b"),
    ("Validation mandant", 15, "#bcbd22"),
    ("Clôture mandat", 10, "#17becf"),
];

// Works mandate (21 steps), ending on the one-year completion warranty.
const WORKS_MANDATE: &[Row] = &[
    ("Signature convention mandat", 7, "#2ca02c"),
    ("Lancement consultation MOE", 30, "#2ca02c"),
    ("Attribution/notification MOE", 15, "#2ca02c"),
    ("OS études conception", 5, "#1f77b4"),
    ("Phase DIAG (si rénovation)", 20, "#1f77b4"),
    ("Phase ESQ (Esquisse)", 30, "#1f77b4"),
    ("Phase APS (Avant-Projet Sommaire)", 45, "#ff7f0e"),
    ("Phase APD (Avant-Projet Définitif)", 60, "#ff7f0e"),
    ("Phase PRO-DCE (Projet-DCE)", 45, "#ff7f0e"),
    ("Lancement consultation entreprises", 30, "#d62728"),
    ("Attribution/notification marchés", 20, "#d62728"),
    ("OS travaux", 5, "#d62728"),
    ("Phase EXE (Études exécution)", 30, "#9467bd"),
    ("Démarrage travaux", 10, "#9467bd"),
    ("Suivi chantier", 240, "#9467bd"),
    ("Réception provisoire", 15, "#8c564b"),
    ("Levée réserves", 60, "#8c564b"),
    ("Réception définitive", 15, "#8c564b"),
    ("DGD (Décompte Général)", 30, "#bcbd22"),
    ("GPA (Garantie Parfait Achèvement)", 365, "#bcbd22"),
    ("Clôture mandat", 15, "#17becf"),
];

// Project-owner assistance mission (15 steps).
const AMO: &[Row] = &[
    ("Signature marché AMO", 7, "#2ca02c"),
    ("Assistance définition besoins", 30, "#2ca02c"),
    ("Assistance retenir MOE", 45, "#2ca02c"),
    ("Suivi études conception", 120, "#1f77b4"),
    ("Assistance rédaction pièces", 30, "#1f77b4"),
    ("Assistance retenir OPC/CT/SPS", 20, "#ff7f0e"),
    ("Assistance marchés entreprises", 60, "#ff7f0e"),
    ("Suivi exécution travaux", 240, "#d62728"),
    ("Assistance réceptions", 30, "#d62728"),
    ("Assistance DGD", 45, "#9467bd"),
    ("Suivi GPA", 365, "#9467bd"),
    ("Assistance clôture", 20, "#8c564b"),
    ("Bilan mission AMO", 15, "#8c564b"),
    ("Retour d'expérience", 10, "#bcbd22"),
    ("Clôture mission", 5, "#17becf"),
];

fn rows(kind: OperationKind) -> &'static [Row] {
    match kind {
        OperationKind::Opp => OPP,
        OperationKind::Vefa => VEFA,
        OperationKind::StudyMandate => STUDY_MANDATE,
        OperationKind::WorksMandate => WORKS_MANDATE,
        OperationKind::Amo => AMO,
    }
}

/// The ordered blueprint list for an operation kind.
///
/// The catalog is process-wide read-only configuration; callers get
/// an owned copy they are free to customize before sequencing.
pub fn template(kind: OperationKind) -> Vec<PhaseBlueprint> {
    rows(kind)
        .iter()
        .map(|(name, days, color)| PhaseBlueprint::new(*name, *days, *color))
        .collect()
}

/// Sum of the nominal durations of a kind's template, in days.
pub fn total_template_duration(kind: OperationKind) -> u32 {
    rows(kind).iter().map(|(_, days, _)| days).sum()
}

/// Parse an operation kind, mapping failures into the engine taxonomy.
pub fn parse_kind(s: &str) -> Result<OperationKind, EngineError> {
    s.parse()
        .map_err(|_| EngineError::UnknownOperationKind(s.to_string()))
}
