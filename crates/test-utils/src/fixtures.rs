//! Shared schema fixtures.
//!
//! Each schema is small and shaped around one traversal rule, so a failing
//! test points at the rule rather than at a large schema. Tests where the
//! schema itself is the subject should keep an inline fixture instead.

/// User -> Team -> `IssueConnection` chain with a paginated connection.
///
/// Useful for testing:
/// - Operation naming along a field path
/// - Argument collection across the path (`id`, `filter`)
/// - Connection inlining of `nodes` and `pageInfo`
pub const CONNECTION_SCHEMA: &str = r#"
type Query {
    user(id: String!): User
}

type User {
    id: ID!
    name: String!
    team: Team
}

type Team {
    id: ID!
    name: String!
    issues(filter: IssueFilter): IssueConnection!
}

input IssueFilter {
    title: String
}

type IssueConnection {
    nodes: [Issue!]!
    pageInfo: PageInfo!
}

type Issue {
    id: ID!
    title: String!
}

type PageInfo {
    hasNextPage: Boolean!
    endCursor: String
}
"#;

/// Two object types referring to each other: `X.y: Y` and `Y.x: X`.
pub const MUTUAL_CYCLE_SCHEMA: &str = r#"
type Query {
    x: X
}

type X {
    id: ID!
    y: Y
}

type Y {
    id: ID!
    x: X
}
"#;

/// A type that refers to itself directly.
pub const SELF_CYCLE_SCHEMA: &str = r#"
type Query {
    node: Node
}

type Node {
    id: ID!
    parent: Node
    children: [Node!]!
}
"#;

/// Types that are also reachable from root queries.
///
/// `Team` is served by `Query.team`, so once a path is longer than its root
/// field, a `Team`-typed child is not given its own operation.
pub const ROOT_QUERY_SCHEMA: &str = r#"
type Query {
    organization: Organization
    team(id: String!): Team
}

type Organization {
    id: ID!
    name: String!
    defaultTeam: Team
    owner: User
}

type Team {
    id: ID!
    name: String!
}

type User {
    id: ID!
    name: String!
    team: Team
}
"#;

/// Schema with deprecated and introspection-only fields plus mutations.
pub const MUTATION_SCHEMA: &str = r#"
type Query {
    viewer: User
    legacyViewer: User @deprecated(reason: "Use viewer")
    ping: Boolean
}

type Mutation {
    "Update a user"
    userUpdate(id: String!, input: UserUpdateInput!): UserPayload!
    logout: Boolean
}

input UserUpdateInput {
    name: String
}

type UserPayload {
    success: Boolean!
    user: User
}

type User {
    id: ID!
    name: String!
    nickname: String @deprecated
    organization: Organization
}

type Organization {
    id: ID!
    name: String!
}
"#;
