//! Static help text served by the `mm_*_help` tools.
//!
//! Help tools are plain text lookups: no arguments, no I/O, deterministic.

/// Index of all tool groups.
pub const HELP_INDEX: &str = "Mattermost MCP Server - 82 tools in 8 groups

1. mm_user_*      (6)  - Users, profiles and props
2. mm_webhook_*   (10) - Incoming/outgoing webhooks
3. mm_team_*      (7)  - Teams and membership
4. mm_channel_*   (11) - Channels, membership and props
5. mm_post_*      (14) - Posts, props and reactions
6. mm_playbook_*  (9)  - Playbook templates and property fields
7. mm_run_*       (13) - Playbook runs and property values
8. mm_task_*      (12) - Checklist tasks and states

Use mm_<group>_help for details on each group.

PROPS - the flat metadata map
-----------------------------
Props are small data drawers (~64KB) on User, Team, Channel and Post,
used for agent configuration and invisible metadata.

The Mattermost API only accepts the flat form { \"key\": \"string value\" }.
Arrays, nested objects and bare numbers/booleans are rejected with a 400.

Recommended encodings:
1. Lists as CSV:              { \"domains\": \"metrics,billing,search\" }
2. Objects flattened by prefix: { \"stack_db\": \"postgres\", \"stack_mq\": \"nats\" }
3. Numbers/booleans as strings: { \"version\": \"1.0\", \"enabled\": \"true\" }
4. Complex JSON stringified (last resort; hard to debug).

Keep each value under ~4KB. For large payloads use run property values
(~5MB) instead of props.";

/// User group help.
pub const HELP_USER: &str = "USER - user accounts. Props hold per-agent configuration (~64KB).

mm_user_get              - Fetch user by id (includes props)
mm_user_get_by_username  - Fetch user by @username
mm_user_search           - Search users by term
mm_user_create           - Create a user (needs admin)
mm_user_update           - Patch profile (nickname, position, names)
mm_user_update_props     - Merge props (read-merge-replace; flat strings only)

Props accept ONLY { \"key\": \"string value\" } - see mm_help for encodings.";

/// Webhook group help.
pub const HELP_WEBHOOK: &str = "WEBHOOK - integrations. Outgoing: Mattermost -> external URL. Incoming: external -> Mattermost.

OUTGOING:
mm_webhook_outgoing_create  - Create outgoing webhook
mm_webhook_outgoing_list    - List a team's outgoing webhooks
mm_webhook_outgoing_get     - Fetch by id
mm_webhook_outgoing_update  - Update display name / callback URLs
mm_webhook_outgoing_delete  - Remove webhook

INCOMING:
mm_webhook_incoming_create  - Create an URL externals can post through
mm_webhook_incoming_list    - List a team's incoming webhooks
mm_webhook_incoming_get     - Fetch by id
mm_webhook_incoming_update  - Update display name / target channel
mm_webhook_incoming_delete  - Remove webhook";

/// Team group help.
pub const HELP_TEAM: &str = "TEAM - teams. Props hold shared configuration (~64KB, flat strings only).

mm_team_get            - Fetch team by id
mm_team_get_by_name    - Fetch team by name
mm_team_list           - List all teams
mm_team_update_props   - Merge team props (read-merge-replace)
mm_team_get_members    - List members
mm_team_add_member     - Add a member
mm_team_remove_member  - Remove a member";

/// Channel group help.
pub const HELP_CHANNEL: &str = "CHANNEL - channels. Props hold channel context (~64KB, flat strings only).

mm_channel_get            - Fetch channel by id
mm_channel_get_by_name    - Fetch channel by team + name
mm_channel_list           - List a team's public channels
mm_channel_search         - Search channels by term
mm_channel_create         - Create a channel
mm_channel_update         - Patch header/purpose/display name
mm_channel_update_props   - Merge channel props (read-merge-replace)
mm_channel_delete         - Archive a channel
mm_channel_get_members    - List members
mm_channel_add_member     - Add a member
mm_channel_remove_member  - Remove a member";

/// Post group help.
pub const HELP_POST: &str = "POST - messages. message is visible (~16KB); props are invisible metadata (~64KB, flat strings only).

mm_post_get             - Fetch post by id
mm_post_get_channel     - Page through a channel's posts
mm_post_get_thread      - Fetch a full thread
mm_post_search          - Search posts in a team
mm_post_create          - Create a post (message + props)
mm_post_update          - Update the message
mm_post_update_props    - Merge post props (read-merge-replace)
mm_post_delete          - Delete a post
mm_post_pin             - Pin to channel
mm_post_unpin           - Unpin
mm_post_get_pinned      - List pinned posts
mm_post_reaction_add    - Add an emoji reaction
mm_post_reaction_remove - Remove a reaction
mm_post_reaction_get    - List reactions";

/// Playbook group help.
pub const HELP_PLAYBOOK: &str = "PLAYBOOK - process templates. Property fields define custom run metadata.

mm_playbook_get          - Fetch playbook by id (includes checklists)
mm_playbook_list         - List a team's playbooks (team_id optional with MM_DEFAULT_TEAM)
mm_playbook_create       - Create a playbook, optionally with checklists
mm_playbook_update       - Update (webhooks, channel_mode, ...); full object is replaced
mm_playbook_delete       - Archive a playbook
mm_playbook_field_list   - List property fields
mm_playbook_field_create - Create a property field
mm_playbook_field_update - Update a property field
mm_playbook_field_delete - Remove a property field";

/// Run group help.
pub const HELP_RUN: &str = "RUN - playbook executions. Property values hold large context (~5MB, JSON allowed).

mm_run_get             - Fetch run by id (includes checklists and task states)
mm_run_get_by_channel  - Fetch the run bound to a channel
mm_run_list            - List a team's runs (team_id optional with MM_DEFAULT_TEAM)
mm_run_start           - Start a run (owner_user_id defaults to the token's user)
mm_run_update          - Update name/description
mm_run_finish          - Mark finished
mm_run_end             - End the run
mm_run_restart         - Restart an ended run
mm_run_status_update   - Post a status update
mm_run_change_owner    - Hand over ownership
mm_run_property_list   - List property fields + values
mm_run_property_get    - Fetch one field's value
mm_run_property_set    - Set a field's value";

/// Task group help.
pub const HELP_TASK: &str = "TASK - checklist items inside a run. Addressed by (checklist_index, item_index);
indices follow the run's CURRENT ordering, so a concurrent reorder invalidates them.

mm_task_get                - Fetch one task by position (null when out of bounds)
mm_task_add                - Append a task to a checklist
mm_task_update             - Update title/command
mm_task_update_description - Replace the description (good for long prompts)
mm_task_delete             - Remove a task
mm_task_set_state          - Set state: \"\" (open), \"in_progress\", \"closed\"
mm_task_check              - Shortcut: state -> closed
mm_task_uncheck            - Shortcut: state -> \"\" (open)
mm_task_set_assignee       - Assign to a user
mm_task_run_command        - Execute the task's slash command
mm_task_reorder            - Move a task within its checklist
mm_task_check_checklist    - Close every open task in a checklist (not atomic)";
