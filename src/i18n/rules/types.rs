//! Typed shape of a locale's business rule set.
//!
//! Fields that only some jurisdictions define are `Option`s and are skipped
//! when serialized, so `apply_rule` reports them as absent.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The fixed rule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Fleet,
    Financial,
    Legal,
    Hr,
    Contracts,
    Cultural,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 6] = [
        RuleCategory::Fleet,
        RuleCategory::Financial,
        RuleCategory::Legal,
        RuleCategory::Hr,
        RuleCategory::Contracts,
        RuleCategory::Cultural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Fleet => "fleet",
            RuleCategory::Financial => "financial",
            RuleCategory::Legal => "legal",
            RuleCategory::Hr => "hr",
            RuleCategory::Contracts => "contracts",
            RuleCategory::Cultural => "cultural",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown rule category: '{}'", s))
    }
}

// ==================== Fleet ====================

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceIntervals {
    pub oil_km: u32,
    pub tires_km: u32,
    pub brakes_km: u32,
    pub inspection_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectionRequirements {
    pub annual: bool,
    pub emissions: bool,
    pub safety: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_control: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsuranceRequirements {
    pub liability: bool,
    pub collision: bool,
    pub comprehensive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_party: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetRules {
    pub vehicle_classification: &'static [&'static str],
    pub maintenance_intervals: MaintenanceIntervals,
    pub inspection_requirements: InspectionRequirements,
    pub insurance_requirements: InsuranceRequirements,
}

// ==================== Financial ====================

#[derive(Debug, Clone, Serialize)]
pub struct TaxRates {
    pub sales: f64,
    pub income: f64,
    pub vat: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceRequirements {
    pub tax_id: bool,
    pub business_license: bool,
    pub bank_details: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial_registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LateFeeRules {
    pub enabled: bool,
    /// Fraction of the outstanding amount charged per month
    pub rate: f64,
    pub grace_period_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialRules {
    pub tax_rates: TaxRates,
    pub accounting_standards: &'static str,
    /// "MM-DD"
    pub fiscal_year_start: &'static str,
    pub invoice_requirements: InvoiceRequirements,
    /// Allowed payment terms in days
    pub payment_terms: &'static [u32],
    pub late_fee_rules: LateFeeRules,
}

// ==================== Legal ====================

#[derive(Debug, Clone, Serialize)]
pub struct ArbitrationRules {
    pub enabled: bool,
    pub location: &'static str,
    pub governing_law: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmploymentLaws {
    pub at_will: bool,
    pub minimum_notice_days: u32,
    pub severance_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gratuity_payment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_working_hours: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrafficViolationCategories {
    pub minor: &'static [&'static str],
    pub major: &'static [&'static str],
    pub criminal: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct LegalRules {
    pub contract_languages: &'static [&'static str],
    pub document_languages: &'static [&'static str],
    pub arbitration_rules: ArbitrationRules,
    pub data_protection_compliance: &'static [&'static str],
    pub employment_laws: EmploymentLaws,
    pub traffic_violation_categories: TrafficViolationCategories,
}

// ==================== HR ====================

/// "HH:MM" span of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub start: &'static str,
    pub end: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkingHours {
    pub regular: TimeSpan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<TimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramadan: Option<TimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_maximum: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OvertimeRules {
    pub enabled: bool,
    /// Hours per week before overtime applies
    pub threshold_hours: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeavePolicies {
    pub annual_days: u32,
    pub sick_days: u32,
    pub maternity_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hajj_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bereavement_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialSecurity {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage_protection_system: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HrRules {
    pub working_hours: WorkingHours,
    pub overtime_rules: OvertimeRules,
    pub leave_policies: LeavePolicies,
    pub minimum_wage: f64,
    pub social_security: SocialSecurity,
}

// ==================== Contracts ====================

#[derive(Debug, Clone, Serialize)]
pub struct DepositRequirements {
    /// Fraction of the contract value
    pub percentage: f64,
    /// Floor in the locale's currency
    pub minimum: f64,
    pub refundable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_deposit: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerminationPeriods {
    pub customer_days: u32,
    pub company_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probation_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_notice_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequirements {
    pub drivers_license: bool,
    /// Additional documents the customer must present
    pub documents: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractRules {
    pub minimum_age: u32,
    pub deposit_requirements: DepositRequirements,
    pub termination_periods: TerminationPeriods,
    pub insurance_mandatory: bool,
    pub registration_requirements: RegistrationRequirements,
}

// ==================== Cultural ====================

#[derive(Debug, Clone, Serialize)]
pub struct BusinessGreetings {
    pub formal: &'static str,
    pub informal: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunicationPreferences {
    pub directness: &'static str,
    pub formality: &'static str,
    pub relationship_building: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CulturalRules {
    pub business_greetings: BusinessGreetings,
    pub negotiation_styles: &'static [&'static str],
    pub communication_preferences: CommunicationPreferences,
    /// ISO dates ("YYYY-MM-DD")
    pub holiday_calendar: &'static [&'static str],
    pub business_etiquette: &'static [(&'static str, &'static str)],
}

/// All business defaults for one locale.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessRuleSet {
    pub fleet: FleetRules,
    pub financial: FinancialRules,
    pub legal: LegalRules,
    pub hr: HrRules,
    pub contracts: ContractRules,
    pub cultural: CulturalRules,
}

/// A borrowed view of one category of a rule set.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum CategoryRules<'a> {
    Fleet(&'a FleetRules),
    Financial(&'a FinancialRules),
    Legal(&'a LegalRules),
    Hr(&'a HrRules),
    Contracts(&'a ContractRules),
    Cultural(&'a CulturalRules),
}

impl BusinessRuleSet {
    /// Dispatch a category to its typed rules.
    pub fn category(&self, category: RuleCategory) -> CategoryRules<'_> {
        match category {
            RuleCategory::Fleet => CategoryRules::Fleet(&self.fleet),
            RuleCategory::Financial => CategoryRules::Financial(&self.financial),
            RuleCategory::Legal => CategoryRules::Legal(&self.legal),
            RuleCategory::Hr => CategoryRules::Hr(&self.hr),
            RuleCategory::Contracts => CategoryRules::Contracts(&self.contracts),
            RuleCategory::Cultural => CategoryRules::Cultural(&self.cultural),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("contracts".parse::<RuleCategory>(), Ok(RuleCategory::Contracts));
        assert_eq!("HR".parse::<RuleCategory>(), Ok(RuleCategory::Hr));
        assert!("inventory".parse::<RuleCategory>().is_err());
    }

    #[test]
    fn test_category_round_trips_through_display() {
        for category in RuleCategory::ALL {
            assert_eq!(category.to_string().parse::<RuleCategory>(), Ok(category));
        }
    }
}
