//! Example: Rendering a view built in code
//!
//! This example demonstrates how to build a model and a container view with
//! the model types directly, without loading a workspace description.

use c4_plantuml::{DiagramWriter, Element, Model, Relationship, View};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building model...\n");

    let mut model = Model::new().with_enterprise("Big Bank plc");
    model.add_element(
        Element::person("customer", "Personal Banking Customer")
            .with_description("A customer of the bank, with personal bank accounts"),
    );
    model.add_element(Element::software_system("bank", "Internet Banking System"));
    model.add_element(
        Element::software_system("mail", "E-mail System")
            .with_description("The internal Microsoft Exchange e-mail system")
            .external(),
    );
    model.add_element(
        Element::container("spa", "Single-Page Application", "bank")
            .with_technology("JavaScript and Angular"),
    );
    model.add_element(
        Element::container("api", "API Application", "bank")
            .with_technology("Java and Spring MVC"),
    );
    model.add_element(
        Element::container("db", "Database", "bank")
            .with_technology("Oracle Database Schema")
            .database(),
    );

    model.add_relationship(
        Relationship::new("r1", "customer", "spa").with_description("Views account balances"),
    );
    model.add_relationship(
        Relationship::new("r2", "spa", "api")
            .with_description("Makes API calls to")
            .with_technology("JSON/HTTPS"),
    );
    model.add_relationship(
        Relationship::new("r3", "api", "db")
            .with_description("Reads from and writes to")
            .with_technology("JDBC"),
    );
    model.add_relationship(
        Relationship::new("r4", "api", "mail").with_description("Sends e-mail using"),
    );

    let mut view = View::container("containers", "bank").with_title("Internet Banking Containers");
    for id in ["customer", "spa", "api", "db", "mail"] {
        view.add_element(id);
    }
    for id in ["r1", "r2", "r3", "r4"] {
        view.add_relationship(c4_plantuml::RelationshipView::new(id));
    }

    println!("Model:");
    println!("  Elements: {}", model.elements().count());
    println!("  Relationships: {}", model.relationships().count());
    println!();

    let writer = DiagramWriter::default();
    let text = writer.render(&model, &view)?;

    println!("{text}");

    let output_path = "from_model_output.puml";
    std::fs::write(output_path, &text)?;
    println!("Diagram written to: {output_path}");

    Ok(())
}
