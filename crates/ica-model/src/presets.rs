//! Built-in specs for the municipal water consumption (SNIS) extract.

use serde::{Deserialize, Serialize};

use crate::format::NumericFormat;
use crate::spec::{NormalizationSpec, SentinelFilter};

/// Source column holding the reference year.
pub const REFERENCE_YEAR_COLUMN: &str = "Ano de Referência";

/// Indicator predicted by the regression model.
pub const TARGET_INDICATOR: &str = "IN022";

/// First indicator column in the raw export; everything from here on is numeric
/// for the positional rule.
pub const POSITIONAL_NUMERIC_OFFSET: usize = 10;

/// Ordered (source, target) rename map for the regression dataset.
pub const WATER_CONSUMPTION_COLUMNS: &[(&str, &str)] = &[
    ("Município", "nm_municipio"),
    (REFERENCE_YEAR_COLUMN, "ano"),
    ("Abrangência", "abrangencia"),
    ("Tipo de Serviço", "tipo_servico"),
    ("Natureza Jurídica", "nat_juridica"),
    ("IN001 - Densidade de economias de água por ligação", "IN001"),
    ("IN009 - Índice de hidrometração", "IN009"),
    ("IN020 - Extensão da rede de água por ligação", "IN020"),
    ("IN022 - Consumo médio percapita de água", "IN022"),
    ("IN023 - Índice de atendimento urbano de água", "IN023"),
    (
        "IN037 - Participação da despesa com energia elétrica nas despesas de exploração",
        "IN037",
    ),
    (
        "IN038 - Participação da despesa com produtos químicos nas despesas de exploração (DEX)",
        "IN038",
    ),
    ("IN055 - Índice de atendimento total de água", "IN055"),
    ("IN057 - Índice de fluoretação de água", "IN057"),
];

/// Numeric predictors (the target is added implicitly).
pub const WATER_CONSUMPTION_NUMERIC: &[&str] = &[
    "IN001", "IN009", "IN020", "IN023", "IN037", "IN038", "IN055", "IN057",
];

/// Named built-in specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Regression dataset, `,` decimal separator.
    #[default]
    WaterConsumption,
    /// Regression dataset, `.` thousands grouping and `,` decimal separator.
    WaterConsumptionGrouped,
    /// Deprecated positional rule: every string column from index 10 is numeric.
    Positional,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::WaterConsumption,
        Preset::WaterConsumptionGrouped,
        Preset::Positional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::WaterConsumption => "water-consumption",
            Self::WaterConsumptionGrouped => "water-consumption-grouped",
            Self::Positional => "positional",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::WaterConsumption => "Regression dataset, decimal comma",
            Self::WaterConsumptionGrouped => "Regression dataset, dot grouping and decimal comma",
            Self::Positional => "All columns, numeric from column 10 (deprecated)",
        }
    }

    pub fn spec(self) -> NormalizationSpec {
        match self {
            Self::WaterConsumption => water_consumption(NumericFormat::decimal_comma()),
            Self::WaterConsumptionGrouped => water_consumption(NumericFormat::grouped()),
            Self::Positional => positional(),
        }
    }
}

fn water_consumption(format: NumericFormat) -> NormalizationSpec {
    let mut spec = NormalizationSpec::new(TARGET_INDICATOR)
        .with_sentinel_filter(SentinelFilter::new(REFERENCE_YEAR_COLUMN))
        .with_integer_field("ano")
        .with_numeric_fields(WATER_CONSUMPTION_NUMERIC.iter().copied())
        .with_categorical_field("tipo_servico")
        .with_numeric_format(format);
    for (source, target) in WATER_CONSUMPTION_COLUMNS {
        spec = spec.with_column(*source, *target);
    }
    spec
}

fn positional() -> NormalizationSpec {
    NormalizationSpec::new(TARGET_INDICATOR)
        .with_sentinel_filter(SentinelFilter::new(REFERENCE_YEAR_COLUMN))
        .with_suffix_rule(" - ")
        .with_integer_field(REFERENCE_YEAR_COLUMN)
        .with_positional_numeric(POSITIONAL_NUMERIC_OFFSET)
        .with_categorical_field("Tipo de Serviço")
        .with_numeric_format(NumericFormat::decimal_comma())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::NumericColumns;

    #[test]
    fn presets_validate() {
        for preset in Preset::ALL {
            preset.spec().validate().expect(preset.name());
        }
    }

    #[test]
    fn water_consumption_keeps_map_order() {
        let spec = Preset::WaterConsumption.spec();
        let names = spec.output_names().expect("known outputs");
        assert_eq!(names.len(), 14);
        assert_eq!(names[0], "nm_municipio");
        assert_eq!(names[1], "ano");
        assert_eq!(names[13], "IN057");
        assert_eq!(spec.named_numeric_fields().len(), 9);
    }

    #[test]
    fn grouped_differs_only_in_format() {
        let plain = Preset::WaterConsumption.spec();
        let grouped = Preset::WaterConsumptionGrouped.spec();
        assert_eq!(grouped.numeric_format, NumericFormat::grouped());
        assert_eq!(
            NormalizationSpec {
                numeric_format: plain.numeric_format,
                ..grouped
            },
            plain
        );
    }

    #[test]
    fn positional_keeps_all_columns() {
        let spec = Preset::Positional.spec();
        assert!(spec.columns.is_empty());
        assert_eq!(
            spec.numeric,
            NumericColumns::Positional {
                offset: POSITIONAL_NUMERIC_OFFSET
            }
        );
    }
}
