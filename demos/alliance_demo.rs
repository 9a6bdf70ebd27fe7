//! Editing the ally list and how it changes region colors

use empire_voronoi::*;

fn main() -> Result<()> {
    let viewer = AccountId::parse_address("0x00000000000000000000000000000000000000aa")?;
    let friend = "0x00000000000000000000000000000000000000bb";
    let rival = "0x00000000000000000000000000000000000000cc";

    let mut alliance = Alliance::new(viewer.clone());

    // Validation mirrors the settings panel input
    for input in [friend, "0x1234", viewer.as_str(), friend] {
        match alliance.add_ally(input) {
            Ok(true) => println!("Added ally {}", input),
            Ok(false) => println!("{} is already an ally", input),
            Err(e) => println!("Rejected {:?}: {}", input, e),
        }
    }

    let palette = Palette::default();
    for owner in [
        Owner::Account(viewer),
        Owner::from_address(friend),
        Owner::from_address(rival),
        Owner::from_address(NULL_ADDRESS),
    ] {
        let relation = alliance.relation(&owner);
        let fill = palette
            .fill_color(relation)
            .map(to_css)
            .unwrap_or_else(|| "none".to_string());
        println!("{:?} -> {:?}, fill {}", owner, relation, fill);
    }

    alliance.remove_ally(friend);
    println!(
        "After removal: {:?}",
        alliance.relation(&Owner::from_address(friend))
    );
    Ok(())
}
