use std::collections::BTreeMap;

use crate::error::{FluidError, FluidResult};
use crate::working_fluid::WorkingFluid;

/// Named fluid table. Ships with a built-in set of common gases and
/// accepts additional entries from a JSON document of the form
/// `{"air": {"specific_heat": 1006.0, ...}, ...}`.
#[derive(Clone, Debug)]
pub struct FluidLibrary {
    fluids: BTreeMap<String, WorkingFluid>,
}

impl FluidLibrary {
    pub fn builtin() -> Self {
        let mut fluids = BTreeMap::new();
        fluids.insert(
            "air".to_owned(),
            WorkingFluid {
                specific_heat: 1006.0,
                specific_ratio: 1.4,
                specific_gas_constant: 287.0,
                kinematic_viscosity: 18.13e-6,
            },
        );
        fluids.insert(
            "nitrogen".to_owned(),
            WorkingFluid {
                specific_heat: 1040.0,
                specific_ratio: 1.4,
                specific_gas_constant: 296.8,
                kinematic_viscosity: 15.0e-6,
            },
        );
        fluids.insert(
            "helium".to_owned(),
            WorkingFluid {
                specific_heat: 5193.0,
                specific_ratio: 1.667,
                specific_gas_constant: 2077.0,
                kinematic_viscosity: 122.0e-6,
            },
        );
        Self { fluids }
    }

    /// Parse a JSON fluid table and merge it over the built-in entries.
    /// Every parsed fluid is validated before it is accepted.
    pub fn from_json(json: &str) -> FluidResult<Self> {
        let parsed: BTreeMap<String, WorkingFluid> = serde_json::from_str(json)?;
        let mut library = Self::builtin();
        for (name, fluid) in parsed {
            fluid.validate()?;
            library.fluids.insert(name, fluid);
        }
        Ok(library)
    }

    pub fn get(&self, name: &str) -> FluidResult<WorkingFluid> {
        self.fluids
            .get(name)
            .copied()
            .ok_or_else(|| FluidError::UnknownFluid {
                name: name.to_owned(),
            })
    }
}

impl Default for FluidLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_air() {
        let air = FluidLibrary::builtin().get("air").unwrap();
        assert!((air.specific_gas_constant - 287.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_fluid_is_an_error() {
        let err = FluidLibrary::builtin().get("unobtainium").unwrap_err();
        assert!(matches!(err, FluidError::UnknownFluid { .. }));
    }

    #[test]
    fn json_entries_override_builtins() {
        let json = r#"{
            "air": {
                "specific_heat": 1005.0,
                "specific_ratio": 1.4,
                "specific_gas_constant": 287.05,
                "kinematic_viscosity": 1.5e-5
            }
        }"#;
        let library = FluidLibrary::from_json(json).unwrap();
        let air = library.get("air").unwrap();
        assert!((air.specific_heat - 1005.0).abs() < 1e-12);
        // built-ins not named in the document survive
        library.get("helium").unwrap();
    }

    #[test]
    fn json_rejects_nonphysical_entry() {
        let json = r#"{
            "broken": {
                "specific_heat": -1.0,
                "specific_ratio": 1.4,
                "specific_gas_constant": 287.0,
                "kinematic_viscosity": 1.5e-5
            }
        }"#;
        assert!(FluidLibrary::from_json(json).is_err());
    }
}
