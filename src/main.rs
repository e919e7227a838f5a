use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let path = gamut_mask::run(std::env::args().skip(1)).context("gamut-mask render failed")?;
    println!("{}", path.display());
    Ok(())
}
