//! Coded enumerations used by the backend, each with a display label.
//!
//! Every enumeration is closed except for an explicit `Unknown` variant that
//! keeps the raw wire code. An unknown code displays as itself and is logged,
//! so a backend that grows a new code degrades visibly instead of silently.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $variant, )+
            /// A code the client does not recognise; the raw code is kept.
            Unknown(String),
        }

        impl $name {
            /// Every known variant, in declaration order.
            pub const KNOWN: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub fn from_code(code: &str) -> Self {
                match code {
                    $( $code => $name::$variant, )+
                    other => {
                        tracing::warn!(code = other, kind = stringify!($name), "Unknown code");
                        $name::Unknown(other.to_string())
                    }
                }
            }

            /// Wire code of this variant.
            pub fn code(&self) -> &str {
                match self {
                    $( $name::$variant => $code, )+
                    $name::Unknown(code) => code,
                }
            }

            /// Human readable label; unknown codes fall back to the raw code.
            pub fn display_name(&self) -> &str {
                match self {
                    $( $name::$variant => $label, )+
                    $name::Unknown(code) => code,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                $name::from_code(&code)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.code().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.display_name())
            }
        }
    };
}

coded_enum! {
    /// Chart-of-accounts classification.
    AccountType {
        Asset => ("ASSET", "Asset"),
        Liability => ("LIABILITY", "Liability"),
        Equity => ("EQUITY", "Equity"),
        Revenue => ("REVENUE", "Revenue"),
        Expense => ("EXPENSE", "Expense"),
    }
}

coded_enum! {
    ReportType {
        BudgetVsActual => ("BUDGET_VS_ACTUAL", "Budget vs. Actual"),
        FinancialStatement => ("FINANCIAL_STATEMENT", "Financial Statement"),
        CashFlow => ("CASH_FLOW", "Cash Flow Statement"),
        TaxSummary => ("TAX_SUMMARY", "Tax Summary"),
    }
}

coded_enum! {
    DocumentType {
        Accounting => ("ACCOUNTING", "Accounting"),
        Contract => ("CONTRACT", "Contract"),
        Receipt => ("RECEIPT", "Receipt"),
        Report => ("REPORT", "Report"),
        Other => ("OTHER", "Other"),
    }
}

coded_enum! {
    /// Issuer of a corporate card statement. Codes are lowercase on the wire.
    CardCompany {
        Shinhan => ("shinhan", "Shinhan Card"),
        Kookmin => ("kookmin", "KB Kookmin Card"),
        Hana => ("hana", "Hana Card"),
        Ibk => ("ibk", "IBK Card"),
    }
}

coded_enum! {
    ProcessStatus {
        Processed => ("PROCESSED", "Processed"),
        Unprocessed => ("UNPROCESSED", "Unprocessed"),
    }
}
