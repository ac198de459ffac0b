//! Generated macro that pushes global parameter values into a simulation.

use std::fmt::Write;

use sp_core::format_real;

use crate::config::GlobalParameter;

/// Class (and file stem) of the generated parameter macro.
pub const PARAMETER_MACRO_CLASS: &str = "update_variables";

/// Render the macro source for `class_name`.
///
/// Each parameter becomes one lookup of the named scalar global parameter
/// followed by a `setValue` call, in the given order. Names are assumed to
/// be validated (no quotes or line breaks).
pub fn render_parameter_macro(class_name: &str, parameters: &[GlobalParameter]) -> String {
    let mut src = String::new();
    // Writing into a String cannot fail.
    let _ = write_macro(&mut src, class_name, parameters);
    src
}

fn write_macro(
    out: &mut String,
    class_name: &str,
    parameters: &[GlobalParameter],
) -> std::fmt::Result {
    writeln!(out, "package macro;")?;
    writeln!(out, "import java.util.*;")?;
    writeln!(out, "import star.common.*;")?;
    writeln!(out, "import star.base.neo.*;")?;
    writeln!(out)?;
    writeln!(out, "public class {class_name} extends StarMacro {{")?;
    writeln!(out, "  public void execute() {{")?;
    writeln!(out, "    execute0();")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;
    writeln!(out, "  private void execute0() {{")?;
    writeln!(out, "    Simulation simulation_0 = getActiveSimulation();")?;
    writeln!(out)?;
    for (index, p) in parameters.iter().enumerate() {
        writeln!(
            out,
            "    ScalarGlobalParameter scalarGlobalParameter_{index} = ((ScalarGlobalParameter) simulation_0.get(GlobalParameterManager.class).getObject(\"{}\"));",
            p.name
        )?;
        writeln!(
            out,
            "    scalarGlobalParameter_{index}.getQuantity().setValue({});",
            format_real(p.value)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_lookup_and_set_per_parameter_in_order() {
        let src = render_parameter_macro(
            PARAMETER_MACRO_CLASS,
            &[
                GlobalParameter::new("mdot", 12.866),
                GlobalParameter::new("alpha", 3.0),
            ],
        );

        assert!(src.contains("public class update_variables extends StarMacro {"));
        let mdot = src
            .find("getObject(\"mdot\")")
            .expect("mdot lookup missing");
        let alpha = src
            .find("getObject(\"alpha\")")
            .expect("alpha lookup missing");
        assert!(mdot < alpha);
        assert!(src.contains("scalarGlobalParameter_0.getQuantity().setValue(12.866);"));
        assert!(src.contains("scalarGlobalParameter_1.getQuantity().setValue(3.0);"));
        assert_eq!(src.matches("setValue(").count(), 2);
    }

    #[test]
    fn empty_parameter_list_still_compiles_to_a_class() {
        let src = render_parameter_macro("noop", &[]);
        assert!(src.starts_with("package macro;\n"));
        assert!(src.ends_with("  }\n}\n"));
        assert!(!src.contains("ScalarGlobalParameter"));
    }
}
