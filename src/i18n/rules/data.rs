//! Built-in business rule sets.
//!
//! Only en, ar and fr carry explicit tables; every other locale resolves to
//! the English set.

use super::types::*;

// ==================== English (United States) ====================

pub static ENGLISH_RULES: BusinessRuleSet = BusinessRuleSet {
    fleet: FleetRules {
        vehicle_classification: &[
            "economy", "compact", "mid-size", "full-size", "suv", "luxury", "truck", "van",
        ],
        maintenance_intervals: MaintenanceIntervals {
            oil_km: 5000,
            tires_km: 10000,
            brakes_km: 20000,
            inspection_days: 365,
        },
        inspection_requirements: InspectionRequirements {
            annual: true,
            emissions: true,
            safety: true,
            registration: None,
            technical_control: None,
        },
        insurance_requirements: InsuranceRequirements {
            liability: true,
            collision: true,
            comprehensive: false,
            third_party: None,
        },
    },

    financial: FinancialRules {
        // Sales tax is a state average; no VAT
        tax_rates: TaxRates {
            sales: 0.08,
            income: 0.21,
            vat: 0.0,
        },
        accounting_standards: "GAAP",
        fiscal_year_start: "01-01",
        invoice_requirements: InvoiceRequirements {
            tax_id: true,
            business_license: true,
            bank_details: true,
            commercial_registration: None,
            vat_number: None,
        },
        payment_terms: &[15, 30, 45, 60],
        late_fee_rules: LateFeeRules {
            enabled: true,
            rate: 0.015,
            grace_period_days: 10,
        },
    },

    legal: LegalRules {
        contract_languages: &["en"],
        document_languages: &["en"],
        arbitration_rules: ArbitrationRules {
            enabled: true,
            location: "neutral",
            governing_law: "US Law",
        },
        data_protection_compliance: &["CCPA"],
        employment_laws: EmploymentLaws {
            at_will: true,
            minimum_notice_days: 0,
            severance_required: false,
            gratuity_payment: None,
            legal_working_hours: None,
        },
        traffic_violation_categories: TrafficViolationCategories {
            minor: &["parking", "speeding <10mph", "equipment"],
            major: &["speeding >=10mph", "reckless driving", "DUI"],
            criminal: &["DUI", "hit and run", "driving without license"],
        },
    },

    hr: HrRules {
        working_hours: WorkingHours {
            regular: TimeSpan {
                start: "09:00",
                end: "17:00",
            },
            extended: Some(TimeSpan {
                start: "08:00",
                end: "20:00",
            }),
            ramadan: None,
            weekend: None,
            legal_maximum: None,
        },
        overtime_rules: OvertimeRules {
            enabled: true,
            threshold_hours: 40,
            rate: 1.5,
        },
        leave_policies: LeavePolicies {
            annual_days: 10,
            sick_days: 5,
            maternity_days: 84,
            hajj_days: None,
            bereavement_days: None,
        },
        // USD per hour (federal)
        minimum_wage: 7.25,
        social_security: SocialSecurity {
            enabled: true,
            employee_rate: Some(0.062),
            employer_rate: Some(0.062),
            wage_protection_system: None,
        },
    },

    contracts: ContractRules {
        minimum_age: 21,
        deposit_requirements: DepositRequirements {
            percentage: 0.2,
            minimum: 200.0,
            refundable: true,
            insurance_deposit: None,
        },
        termination_periods: TerminationPeriods {
            customer_days: 30,
            company_days: 30,
            probation_months: None,
            rental_notice_days: None,
        },
        insurance_mandatory: true,
        registration_requirements: RegistrationRequirements {
            drivers_license: true,
            documents: &["credit_check"],
        },
    },

    cultural: CulturalRules {
        business_greetings: BusinessGreetings {
            formal: "Dear [Name]",
            informal: "Hi [Name]",
        },
        negotiation_styles: &["direct", "time-focused", "individual"],
        communication_preferences: CommunicationPreferences {
            directness: "high",
            formality: "medium",
            relationship_building: "medium",
        },
        holiday_calendar: &["2024-01-01", "2024-07-04", "2024-11-28", "2024-12-25"],
        business_etiquette: &[
            ("punctuality", "important"),
            ("dress_code", "business casual"),
            ("gift_giving", "occasional"),
        ],
    },
};

// ==================== Arabic (Qatar) ====================

pub static ARABIC_RULES: BusinessRuleSet = BusinessRuleSet {
    fleet: FleetRules {
        vehicle_classification: &[
            "اقتصادي",
            "مدمج",
            "متوسط",
            "كامل",
            "دفع رباعي",
            "فاخر",
            "شاحنة",
            "حافلة",
        ],
        maintenance_intervals: MaintenanceIntervals {
            oil_km: 5000,
            tires_km: 10000,
            brakes_km: 20000,
            inspection_days: 365,
        },
        inspection_requirements: InspectionRequirements {
            annual: true,
            emissions: true,
            safety: true,
            registration: Some(true),
            technical_control: None,
        },
        insurance_requirements: InsuranceRequirements {
            liability: true,
            collision: false,
            comprehensive: false,
            third_party: Some(true),
        },
    },

    financial: FinancialRules {
        tax_rates: TaxRates {
            sales: 0.0,
            income: 0.10,
            vat: 0.05,
        },
        accounting_standards: "IFRS",
        fiscal_year_start: "01-01",
        invoice_requirements: InvoiceRequirements {
            tax_id: true,
            business_license: true,
            bank_details: true,
            commercial_registration: Some(true),
            vat_number: None,
        },
        payment_terms: &[15, 30, 60, 90],
        // 2% per month under the Commercial Law
        late_fee_rules: LateFeeRules {
            enabled: true,
            rate: 0.02,
            grace_period_days: 15,
        },
    },

    legal: LegalRules {
        contract_languages: &["ar"],
        document_languages: &["ar", "en"],
        arbitration_rules: ArbitrationRules {
            enabled: true,
            location: "Qatar",
            governing_law: "Qatari Law",
        },
        data_protection_compliance: &["QDPDP"],
        employment_laws: EmploymentLaws {
            at_will: false,
            minimum_notice_days: 30,
            severance_required: true,
            gratuity_payment: Some(true),
            legal_working_hours: None,
        },
        traffic_violation_categories: TrafficViolationCategories {
            minor: &["مخالفات وقوف", "تجاوز سرعة بسيط", "مخالفات معدات"],
            major: &["تجاوز سرعة كبير", "قيادة متهورة", "منع التصوير"],
            criminal: &["قيادة تحت تأثير", "هروب من مكان الحادث", "قيادة بدون رخصة"],
        },
    },

    hr: HrRules {
        working_hours: WorkingHours {
            regular: TimeSpan {
                start: "07:00",
                end: "15:00",
            },
            extended: None,
            ramadan: Some(TimeSpan {
                start: "09:00",
                end: "14:00",
            }),
            weekend: Some("Friday-Saturday"),
            legal_maximum: None,
        },
        overtime_rules: OvertimeRules {
            enabled: true,
            threshold_hours: 48,
            rate: 1.25,
        },
        leave_policies: LeavePolicies {
            annual_days: 30,
            sick_days: 14,
            maternity_days: 70,
            hajj_days: Some(14),
            bereavement_days: Some(5),
        },
        // QAR per month
        minimum_wage: 300.0,
        social_security: SocialSecurity {
            enabled: false,
            employee_rate: None,
            employer_rate: None,
            wage_protection_system: Some(true),
        },
    },

    contracts: ContractRules {
        minimum_age: 21,
        deposit_requirements: DepositRequirements {
            percentage: 0.25,
            minimum: 500.0,
            refundable: true,
            insurance_deposit: Some(1000.0),
        },
        termination_periods: TerminationPeriods {
            customer_days: 30,
            company_days: 30,
            probation_months: Some(6),
            rental_notice_days: None,
        },
        insurance_mandatory: true,
        registration_requirements: RegistrationRequirements {
            drivers_license: true,
            documents: &["qatar_id", "residency_permit", "sponsor_letter"],
        },
    },

    cultural: CulturalRules {
        business_greetings: BusinessGreetings {
            formal: "السيد/السيدة [الاسم] المحترم/المحترمة",
            informal: "أهلاً [الاسم]",
        },
        negotiation_styles: &["relationship-based", "indirect", "patience-focused"],
        communication_preferences: CommunicationPreferences {
            directness: "low",
            formality: "high",
            relationship_building: "high",
        },
        holiday_calendar: &["2024-03-11", "2024-04-10", "2024-06-17", "2024-12-18"],
        business_etiquette: &[
            ("punctuality", "flexible"),
            ("dress_code", "conservative business"),
            ("gift_giving", "important"),
            ("prayer_breaks", "required"),
        ],
    },
};

// ==================== French (France) ====================

pub static FRENCH_RULES: BusinessRuleSet = BusinessRuleSet {
    fleet: FleetRules {
        vehicle_classification: &[
            "économique",
            "compact",
            "berline",
            "grande berline",
            "SUV",
            "luxe",
            "utilitaire",
            "monospace",
        ],
        maintenance_intervals: MaintenanceIntervals {
            oil_km: 15000,
            tires_km: 20000,
            brakes_km: 30000,
            inspection_days: 365,
        },
        inspection_requirements: InspectionRequirements {
            annual: true,
            emissions: true,
            safety: true,
            registration: None,
            technical_control: Some(true),
        },
        insurance_requirements: InsuranceRequirements {
            liability: true,
            collision: false,
            comprehensive: false,
            third_party: Some(true),
        },
    },

    financial: FinancialRules {
        tax_rates: TaxRates {
            sales: 0.20,
            income: 0.25,
            vat: 0.20,
        },
        accounting_standards: "IFRS",
        fiscal_year_start: "01-01",
        invoice_requirements: InvoiceRequirements {
            tax_id: true,
            business_license: true,
            bank_details: true,
            commercial_registration: None,
            vat_number: Some(true),
        },
        payment_terms: &[15, 30, 45, 60, 90],
        late_fee_rules: LateFeeRules {
            enabled: true,
            rate: 0.03,
            grace_period_days: 0,
        },
    },

    legal: LegalRules {
        contract_languages: &["fr"],
        document_languages: &["fr"],
        arbitration_rules: ArbitrationRules {
            enabled: true,
            location: "France",
            governing_law: "French Law",
        },
        data_protection_compliance: &["GDPR"],
        employment_laws: EmploymentLaws {
            at_will: false,
            minimum_notice_days: 30,
            severance_required: true,
            gratuity_payment: None,
            legal_working_hours: Some(35),
        },
        traffic_violation_categories: TrafficViolationCategories {
            minor: &["stationnement", "vitesse <5km/h", "équipement"],
            major: &["vitesse >=5km/h", "conduite dangereuse", "alcoolémie"],
            criminal: &[
                "conduite en état d'ivresse",
                "délit de fuite",
                "conduite sans permis",
            ],
        },
    },

    hr: HrRules {
        working_hours: WorkingHours {
            regular: TimeSpan {
                start: "09:00",
                end: "17:00",
            },
            extended: None,
            ramadan: None,
            weekend: None,
            legal_maximum: Some(35),
        },
        overtime_rules: OvertimeRules {
            enabled: true,
            threshold_hours: 35,
            rate: 1.25,
        },
        leave_policies: LeavePolicies {
            annual_days: 25,
            // Covered by sécurité sociale
            sick_days: 0,
            maternity_days: 112,
            hajj_days: None,
            bereavement_days: None,
        },
        // EUR per hour (SMIC)
        minimum_wage: 11.27,
        social_security: SocialSecurity {
            enabled: true,
            employee_rate: Some(0.22),
            employer_rate: Some(0.45),
            wage_protection_system: None,
        },
    },

    contracts: ContractRules {
        minimum_age: 18,
        deposit_requirements: DepositRequirements {
            percentage: 0.30,
            minimum: 300.0,
            refundable: true,
            insurance_deposit: None,
        },
        termination_periods: TerminationPeriods {
            customer_days: 30,
            company_days: 30,
            probation_months: None,
            rental_notice_days: Some(15),
        },
        insurance_mandatory: true,
        registration_requirements: RegistrationRequirements {
            drivers_license: true,
            documents: &["national_id", "proof_of_address", "bank_statement"],
        },
    },

    cultural: CulturalRules {
        business_greetings: BusinessGreetings {
            formal: "Cher [Nom] / Chère [Nom]",
            informal: "Salut [Nom]",
        },
        negotiation_styles: &["logical", "detail-oriented", "formal"],
        communication_preferences: CommunicationPreferences {
            directness: "medium",
            formality: "high",
            relationship_building: "medium",
        },
        holiday_calendar: &["2024-01-01", "2024-05-01", "2024-07-14", "2024-12-25"],
        business_etiquette: &[
            ("punctuality", "expected"),
            ("dress_code", "formal business"),
            ("gift_giving", "modest"),
            ("business_lunches", "common"),
        ],
    },
};
