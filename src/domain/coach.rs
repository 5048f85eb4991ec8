use crate::errors::ValidationError;

/// Coach points typed for a team; an empty field counts as zero.
pub fn parse_coach_points(team: &str, input: &str) -> Result<u32, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidCoachPoints {
            team: team.to_string(),
            input: value.to_string(),
        })
}

/// Parse a `TEAM=POINTS` override. Splits on the last `=` so team names may contain one.
pub fn parse_coach_override(input: &str) -> Result<(String, u32), ValidationError> {
    let (team, points) = input
        .rsplit_once('=')
        .filter(|(team, _)| !team.trim().is_empty())
        .ok_or_else(|| ValidationError::MalformedArgument {
            input: input.to_string(),
            expected: "TEAM=POINTS",
        })?;

    let team = team.trim().to_string();
    let points = parse_coach_points(&team, points)?;
    Ok((team, points))
}
